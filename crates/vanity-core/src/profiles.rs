use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::ConfigError;

/// One tracked person or group and their handle on each platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub youtube: Vec<String>,
    #[serde(default)]
    pub instagram: Vec<String>,
    #[serde(default)]
    pub tiktok: Vec<String>,
    #[serde(default)]
    pub twitter: Vec<String>,
    #[serde(default)]
    pub threads: Vec<String>,
    #[serde(default)]
    pub twitch: Vec<String>,
    #[serde(default)]
    pub soundcloud: Vec<String>,
    /// Spotify artist ids, not display handles.
    #[serde(default)]
    pub spotify: Vec<String>,
    #[serde(default)]
    pub newgrounds: Vec<String>,
    #[serde(default)]
    pub facebook: Vec<String>,
}

impl ProfileConfig {
    #[must_use]
    pub fn handles(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::YouTube => &self.youtube,
            Platform::Instagram => &self.instagram,
            Platform::TikTok => &self.tiktok,
            Platform::Twitter => &self.twitter,
            Platform::Threads => &self.threads,
            Platform::Twitch => &self.twitch,
            Platform::SoundCloud => &self.soundcloud,
            Platform::Spotify => &self.spotify,
            Platform::Newgrounds => &self.newgrounds,
            Platform::Facebook => &self.facebook,
        }
    }

    /// Every configured account, platforms in [`Platform::ALL`] order and
    /// handles in file order.
    #[must_use]
    pub fn accounts(&self) -> Vec<(Platform, &str)> {
        Platform::ALL
            .into_iter()
            .flat_map(|p| self.handles(p).iter().map(move |h| (p, h.as_str())))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfilesFile {
    pub profiles: Vec<ProfileConfig>,
}

impl ProfilesFile {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ProfileConfig> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

/// Load and validate the profile roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profiles(path: &Path) -> Result<ProfilesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfilesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profiles_file: ProfilesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProfilesFileParse)?;

    validate_profiles(&profiles_file)?;

    Ok(profiles_file)
}

fn is_file_safe(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn validate_profiles(profiles_file: &ProfilesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for profile in &profiles_file.profiles {
        if profile.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "profile id must be non-empty".to_string(),
            ));
        }

        if !is_file_safe(&profile.id) {
            return Err(ConfigError::Validation(format!(
                "profile id '{}' may only contain a-z, 0-9, '-' and '_'",
                profile.id
            )));
        }

        if !seen_ids.insert(profile.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate profile id: '{}'",
                profile.id
            )));
        }

        for platform in Platform::ALL {
            let mut seen_handles = HashSet::new();
            for handle in profile.handles(platform) {
                if handle.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "profile '{}' has an empty {platform} handle",
                        profile.id
                    )));
                }
                if !seen_handles.insert(handle.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "profile '{}' lists {platform} handle '{handle}' twice",
                        profile.id
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;

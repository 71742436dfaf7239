pub mod client;
pub mod count;
pub mod error;
mod html;
pub mod platforms;
mod rate_limit;
pub mod strategy;

pub use client::{encode_data_url, ScrapeClient};
pub use count::parse_abbreviated_count;
pub use error::ScraperError;
pub use platforms::{page_url, parse_profile, profile_link};
pub use strategy::{FetchStrategy, RetryPolicy};

//! Domain client for the Hacker News API.
mod client;
mod types;


pub use client::HnClient;
pub use types::{Item, ItemType, StoryList, Updates, User, VOLATILE_ITEM_FIELDS};

/// Public endpoint of the service under test.
pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

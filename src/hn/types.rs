use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, ValidationError, ValidationKind};

/// Item fields that change while an item is live.
pub const VOLATILE_ITEM_FIELDS: [&str; 3] = ["score", "descendants", "kids"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Story,
    Comment,
    Job,
    Poll,
    #[serde(rename = "pollopt")]
    PollOpt,
}

/// A story, comment, job, poll or poll option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descendants: Option<u64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl Item {
    /// A copy with [`VOLATILE_ITEM_FIELDS`] cleared, for comparing snapshots
    /// of a live item.
    #[must_use]
    pub fn without_volatile(&self) -> Self {
        Self {
            score: None,
            descendants: None,
            kids: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub created: i64,
    pub karma: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Vec<u64>>,
}

/// Recently changed items and profiles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Updates {
    pub items: Vec<u64>,
    pub profiles: Vec<String>,
}

/// The ranked and recent story-id list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryList {
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl StoryList {
    pub const ALL: [StoryList; 6] = [
        StoryList::Top,
        StoryList::New,
        StoryList::Best,
        StoryList::Ask,
        StoryList::Show,
        StoryList::Job,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StoryList::Top => "top",
            StoryList::New => "new",
            StoryList::Best => "best",
            StoryList::Ask => "ask",
            StoryList::Show => "show",
            StoryList::Job => "job",
        }
    }

    /// Final path segment of the list endpoint, e.g. `topstories.json`.
    #[must_use]
    pub fn endpoint(self) -> String {
        format!("{}stories.json", self.as_str())
    }
}

impl fmt::Display for StoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryList {
    type Err = AppError;

    /// Accepts both the short name (`top`) and the endpoint name (`topstories`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix(".json")
            .unwrap_or(&normalized)
            .trim_end_matches("stories");
        StoryList::ALL
            .into_iter()
            .find(|list| list.as_str() == name)
            .ok_or_else(|| {
                AppError::validation(ValidationError::new(
                    ValidationKind::Enum,
                    "list",
                    format!("Unknown story list '{}'", s),
                    json!({
                        "allowed": StoryList::ALL.map(StoryList::as_str),
                        "actual": s,
                    }),
                ))
            })
    }
}

use crate::error::{HuntError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Platform-assigned numeric user id, kept in its string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

static MENTION_RE: OnceLock<Regex> = OnceLock::new();

fn mention_re() -> &'static Regex {
    MENTION_RE.get_or_init(|| Regex::new(r"^<@!?(\d+)>$").unwrap())
}

impl UserId {
    /// Parse a raw numeric id (`"1234"`) or a mention (`"<@1234>"`, `"<@!1234>"`).
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Some(caps) = mention_re().captures(raw) {
            return Ok(Self(caps[1].to_string()));
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self(raw.to_string()));
        }
        Err(HuntError::InvalidUserId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `<@id>` form the chat platform renders as a user mention.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// HuntEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntEntry {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

impl HuntEntry {
    pub fn new(name: impl Into<String>, categories: Vec<String>) -> Self {
        let mut entry = Self {
            name: name.into(),
            categories: Vec::new(),
            completed: false,
        };
        entry.merge_categories(&categories);
        entry
    }

    /// Append every tag in `incoming` that is not already present, keeping
    /// first-seen order. Returns how many tags were added.
    pub fn merge_categories(&mut self, incoming: &[String]) -> usize {
        let before = self.categories.len();
        for tag in incoming {
            if !self.categories.contains(tag) {
                self.categories.push(tag.clone());
            }
        }
        self.categories.len() - before
    }
}

/// Every user's hunt list, keyed by user id.
pub type HuntMap = BTreeMap<UserId, Vec<HuntEntry>>;

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended to the list.
    Added,
    /// An entry with the same name existed; its categories were extended.
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionResult {
    NotFound,
    AlreadyComplete,
    Marked,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I don't have specific information on that topic. Please contact our support team for more details.";

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to parse knowledge base: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A keyword and the canned answer returned when the keyword appears in a question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(deserialize_with = "lowercase")]
    keyword: String,
    response: String,
}

fn lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_lowercase())
}

impl KnowledgeEntry {
    #[cfg(test)]
    pub fn new(keyword: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            response: response.into(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Ordered keyword table. Lookups scan in insertion order and the first hit wins,
/// so an earlier short keyword shadows any later keyword that contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of `{ "keyword": .., "response": .. }` objects.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(test)]
    pub fn push(&mut self, entry: KnowledgeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<KnowledgeEntry> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = KnowledgeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Picks the canned answer for `input`. Never fails: unmatched input gets
/// [`FALLBACK_RESPONSE`].
pub fn respond<'a>(input: &str, kb: &'a KnowledgeBase) -> &'a str {
    let normalized = input.to_lowercase();
    kb.entries()
        .iter()
        .find(|entry| normalized.contains(entry.keyword()))
        .map(KnowledgeEntry::response)
        .unwrap_or(FALLBACK_RESPONSE)
}

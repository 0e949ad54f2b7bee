//! The book record handed over by the host, and batch construction.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// Opaque identifier assigned by the host.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Book metadata as read from the host library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookItem {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    pub sort_authors: Vec<String>,
    pub sort_title: Option<String>,
    pub comments: Option<String>,
    pub tags: Vec<String>,
    pub series: Option<String>,
    pub series_index: Option<f64>,
    pub publisher: Option<String>,
    pub identifiers: BTreeMap<String, String>,
    pub languages: Vec<String>,
    pub pubdate: Option<DateTime<Utc>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub rating: Option<u8>,
}

impl BookItem {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: BookId(id),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builds a batch from parallel columns. `authors` may be empty, meaning
    /// no author data at all; otherwise every column must be the same length.
    pub fn from_columns(
        ids: &[u64],
        titles: &[String],
        authors: &[Vec<String>],
    ) -> Result<Vec<BookItem>> {
        let authors_ok = authors.is_empty() || authors.len() == ids.len();
        if ids.len() != titles.len() || !authors_ok {
            return Err(NormalizeError::InconsistentBatchLengths {
                ids: ids.len(),
                titles: titles.len(),
                authors: authors.len(),
            });
        }

        Ok(ids
            .iter()
            .zip(titles)
            .enumerate()
            .map(|(i, (&id, title))| {
                BookItem::new(id, title.clone())
                    .with_authors(authors.get(i).cloned().unwrap_or_default())
            })
            .collect())
    }
}

/// Every distinct, non-blank author in the batch, sorted.
pub fn collect_authors(books: &[BookItem]) -> Vec<String> {
    books
        .iter()
        .flat_map(|b| b.authors.iter())
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

//! Rename planning.
//!
//! A plan pairs each book with the title it should get: the chosen base
//! title followed by its 1-based position in the batch, rendered in the
//! requested numbering style. Plans are values; writing them back is up to
//! the host.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::book::{BookId, BookItem};
use crate::error::{NormalizeError, Result};
use crate::numeral::{format_volume_number, NumberingStyle};

/// Fields the host should empty when it applies a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearFlags {
    pub tags: bool,
    pub series: bool,
    pub publisher: bool,
}

impl Default for ClearFlags {
    fn default() -> Self {
        Self {
            tags: true,
            series: true,
            publisher: true,
        }
    }
}

/// What happens to a book's authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "author", rename_all = "lowercase")]
pub enum AuthorChange {
    /// Keep whatever authors the book already has.
    Unchanged,
    /// Replace all authors with this one.
    Replace(String),
}

impl AuthorChange {
    /// A blank or missing override leaves authors untouched.
    pub fn from_override(author: Option<&str>) -> Self {
        match author.map(str::trim) {
            Some(a) if !a.is_empty() => AuthorChange::Replace(a.to_string()),
            _ => AuthorChange::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    pub base_title: String,
    pub author: Option<String>,
    pub clear: ClearFlags,
    pub style: NumberingStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlan {
    pub id: BookId,
    /// 1-based position in the batch.
    pub index: usize,
    pub old_title: String,
    pub new_title: String,
    pub old_authors: Vec<String>,
    pub new_author: AuthorChange,
    pub clear: ClearFlags,
}

impl RenamePlan {
    /// The record the host should store for `book` once this plan is applied.
    pub fn apply(&self, book: &BookItem) -> BookItem {
        let (authors, sort_authors) = match &self.new_author {
            AuthorChange::Replace(author) => (vec![author.clone()], vec![author.clone()]),
            AuthorChange::Unchanged => (book.authors.clone(), book.sort_authors.clone()),
        };
        let sort_title = book
            .sort_title
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.new_title.clone());

        BookItem {
            id: book.id,
            title: self.new_title.clone(),
            authors,
            sort_authors,
            sort_title: Some(sort_title),
            comments: book.comments.clone(),
            tags: if self.clear.tags {
                Vec::new()
            } else {
                book.tags.clone()
            },
            series: if self.clear.series {
                None
            } else {
                book.series.clone()
            },
            series_index: if self.clear.series {
                None
            } else {
                book.series_index
            },
            publisher: if self.clear.publisher {
                None
            } else {
                book.publisher.clone()
            },
            identifiers: book.identifiers.clone(),
            languages: book.languages.clone(),
            pubdate: book.pubdate,
            timestamp: book.timestamp,
            last_modified: book.last_modified,
            rating: book.rating,
        }
    }
}

/// Builds one plan per book, in the order given.
pub fn plan_renames(books: &[BookItem], options: &RenameOptions) -> Result<Vec<RenamePlan>> {
    let plans = build_plans(books, options)?;
    info!(
        count = plans.len(),
        base = %options.base_title.trim(),
        style = ?options.style,
        "rename plans built"
    );
    Ok(plans)
}

/// Computes the same plans as [`plan_renames`] for display only.
pub fn preview_renames(books: &[BookItem], options: &RenameOptions) -> Result<Vec<RenamePlan>> {
    build_plans(books, options)
}

fn build_plans(books: &[BookItem], options: &RenameOptions) -> Result<Vec<RenamePlan>> {
    let base = options.base_title.trim();
    if base.is_empty() {
        return Err(NormalizeError::EmptyInput("base title"));
    }
    if books.is_empty() {
        return Err(NormalizeError::EmptyInput("items"));
    }

    let total = books.len();
    let new_author = AuthorChange::from_override(options.author.as_deref());

    Ok(books
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let index = i + 1;
            let new_title = format!(
                "{base}{}",
                format_volume_number(index, options.style, total)
            );
            debug!(id = %book.id, old = %book.title, new = %new_title, "planned rename");
            RenamePlan {
                id: book.id,
                index,
                old_title: book.title.clone(),
                new_title,
                old_authors: book.authors.clone(),
                new_author: new_author.clone(),
                clear: options.clear,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(n: u64) -> Vec<BookItem> {
        (1..=n)
            .map(|i| BookItem::new(i, format!("旧书名 {i}")).with_authors(["原作者"]))
            .collect()
    }

    fn options(base: &str, style: NumberingStyle) -> RenameOptions {
        RenameOptions {
            base_title: base.to_string(),
            style,
            ..RenameOptions::default()
        }
    }

    #[test]
    fn test_numeric_titles_for_small_batch() {
        let plans = plan_renames(&books(3), &options("三体", NumberingStyle::Numeric)).unwrap();
        let titles: Vec<&str> = plans.iter().map(|p| p.new_title.as_str()).collect();
        assert_eq!(titles, vec!["三体01", "三体02", "三体03"]);
    }

    #[test]
    fn test_numeric_titles_for_twelve() {
        let plans = plan_renames(&books(12), &options("X", NumberingStyle::Numeric)).unwrap();
        assert_eq!(plans.len(), 12);
        assert_eq!(plans[0].new_title, "X01");
        assert_eq!(plans[11].new_title, "X12");
    }

    #[test]
    fn test_chinese_titles() {
        let plans = plan_renames(&books(2), &options("诛仙", NumberingStyle::Chinese)).unwrap();
        assert_eq!(plans[0].new_title, "诛仙第一卷");
        assert_eq!(plans[1].new_title, "诛仙第二卷");
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let input = vec![BookItem::new(9, "c"), BookItem::new(3, "a"), BookItem::new(5, "b")];
        let plans = plan_renames(&input, &options("T", NumberingStyle::Numeric)).unwrap();
        let ids: Vec<u64> = plans.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![9, 3, 5]);
        assert_eq!(plans[2].index, 3);
        assert_eq!(plans[2].old_title, "b");
    }

    #[test]
    fn test_author_override() {
        let mut opts = options("T", NumberingStyle::Numeric);
        let plans = plan_renames(&books(1), &opts).unwrap();
        assert_eq!(plans[0].new_author, AuthorChange::Unchanged);
        assert_eq!(plans[0].old_authors, vec!["原作者"]);

        opts.author = Some("   ".to_string());
        let plans = plan_renames(&books(1), &opts).unwrap();
        assert_eq!(plans[0].new_author, AuthorChange::Unchanged);

        opts.author = Some(" 刘慈欣 ".to_string());
        let plans = plan_renames(&books(1), &opts).unwrap();
        assert_eq!(plans[0].new_author, AuthorChange::Replace("刘慈欣".to_string()));
    }

    #[test]
    fn test_rejects_blank_base_title_and_empty_batch() {
        let err = plan_renames(&books(2), &options("  ", NumberingStyle::Numeric)).unwrap_err();
        assert!(matches!(err, NormalizeError::EmptyInput("base title")));

        let err = plan_renames(&[], &options("T", NumberingStyle::Numeric)).unwrap_err();
        assert!(matches!(err, NormalizeError::EmptyInput("items")));
    }

    #[test]
    fn test_preview_matches_plan() {
        let opts = options("T", NumberingStyle::Chinese);
        assert_eq!(
            preview_renames(&books(4), &opts).unwrap(),
            plan_renames(&books(4), &opts).unwrap()
        );
    }

    #[test]
    fn test_apply_clears_flagged_fields() {
        let mut book = BookItem::new(1, "旧").with_authors(["甲"]);
        book.tags = vec!["科幻".into()];
        book.series = Some("三体".into());
        book.series_index = Some(1.0);
        book.publisher = Some("重庆出版社".into());
        book.rating = Some(8);
        book.languages = vec!["zho".into()];

        let mut opts = options("新", NumberingStyle::Numeric);
        opts.author = Some("乙".into());
        let plans = plan_renames(std::slice::from_ref(&book), &opts).unwrap();
        let updated = plans[0].apply(&book);

        assert_eq!(updated.title, "新01");
        assert_eq!(updated.authors, vec!["乙"]);
        assert_eq!(updated.sort_authors, vec!["乙"]);
        assert_eq!(updated.sort_title.as_deref(), Some("新01"));
        assert!(updated.tags.is_empty());
        assert_eq!(updated.series, None);
        assert_eq!(updated.series_index, None);
        assert_eq!(updated.publisher, None);
        assert_eq!(updated.rating, Some(8));
        assert_eq!(updated.languages, vec!["zho"]);
    }

    #[test]
    fn test_apply_keeps_unflagged_fields() {
        let mut book = BookItem::new(1, "旧").with_authors(["甲"]);
        book.sort_title = Some("jiu".into());
        book.tags = vec!["科幻".into()];
        book.publisher = Some("重庆出版社".into());

        let mut opts = options("新", NumberingStyle::Numeric);
        opts.clear = ClearFlags {
            tags: false,
            series: true,
            publisher: false,
        };
        let plans = plan_renames(std::slice::from_ref(&book), &opts).unwrap();
        let updated = plans[0].apply(&book);

        assert_eq!(updated.authors, vec!["甲"]);
        assert_eq!(updated.sort_title.as_deref(), Some("jiu"));
        assert_eq!(updated.tags, vec!["科幻"]);
        assert_eq!(updated.publisher.as_deref(), Some("重庆出版社"));
    }
}

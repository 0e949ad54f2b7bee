//! Reading a batch of books from disk.
//!
//! `.json` files hold an array of [`BookItem`] records. Anything else is a
//! plain title list, one book per line, optionally followed by a tab and a
//! `;`-separated author list. Plain lists are charset-sniffed, so GBK or
//! Big5 exports load as well as UTF-8.

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::{debug, info, warn};

use crate::book::BookItem;
use crate::error::Result;

pub fn load_books(path: &Path) -> Result<Vec<BookItem>> {
    let bytes = fs::read(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let books = if is_json {
        serde_json::from_slice(&bytes)?
    } else {
        parse_title_lines(&decode(&bytes))
    };
    info!(path = %path.display(), count = books.len(), "books loaded");
    Ok(books)
}

/// Decodes bytes in whatever charset they appear to be in.
pub fn decode(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding: &'static Encoding = detector.guess(None, true);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "undecodable bytes replaced");
    } else {
        debug!(encoding = used.name(), "decoded title list");
    }
    text.into_owned()
}

/// One book per non-blank line; its id is the 1-based line number.
pub fn parse_title_lines(text: &str) -> Vec<BookItem> {
    let mut books = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let (title, authors) = match line.split_once('\t') {
            Some((title, authors)) => (title.trim(), authors),
            None => (line.trim(), ""),
        };
        if title.is_empty() {
            debug!(line = i + 1, "skipping blank line");
            continue;
        }
        let authors = authors
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty());
        books.push(BookItem::new(i as u64 + 1, title).with_authors(authors));
    }
    books
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_lines() {
        let books = parse_title_lines("三体 第一卷\t刘慈欣\n\n三体 第二卷\n  \nX\tA; B ;\n");
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].id.0, 1);
        assert_eq!(books[0].authors, vec!["刘慈欣"]);
        assert_eq!(books[1].id.0, 3);
        assert_eq!(books[1].title, "三体 第二卷");
        assert!(books[1].authors.is_empty());
        assert_eq!(books[2].authors, vec!["A", "B"]);
    }

    #[test]
    fn test_decode_gbk() {
        let list = "三体 第一卷 地球往事\n三体 第二卷 黑暗森林\n三体 第三卷 死神永生\n\
                    斗罗大陆 第一卷 唐门外门弟子\n凡人修仙传 第十二卷 大战魔道\n";
        let (bytes, _, _) = encoding_rs::GBK.encode(list);
        assert_ne!(&*bytes, list.as_bytes());
        assert_eq!(decode(&bytes), list);
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode("海贼王 01".as_bytes()), "海贼王 01");
    }
}

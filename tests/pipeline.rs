use std::io::Write;

use volnorm::loader::load_books;
use volnorm::{
    infer_base_title, plan_renames, sort_by_volume, AuthorChange, BookItem, NumberingStyle,
    NormalizeError, RenameOptions,
};

fn titles(books: &[BookItem]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

#[test]
fn shuffled_series_is_sorted_named_and_renumbered() {
    let books = vec![
        BookItem::new(1, "凡人修仙传 第三卷").with_authors(["忘语"]),
        BookItem::new(2, "凡人修仙传（一）").with_authors(["忘语"]),
        BookItem::new(3, "凡人修仙传 - 2").with_authors(["忘语"]),
    ];

    let sorted: Vec<BookItem> = sort_by_volume(books).into_iter().map(|e| e.item).collect();
    assert_eq!(sorted.iter().map(|b| b.id.0).collect::<Vec<_>>(), vec![2, 3, 1]);

    let base = infer_base_title(&titles(&sorted));
    assert_eq!(base, "凡人修仙传");

    let options = RenameOptions {
        base_title: base,
        style: NumberingStyle::Chinese,
        ..RenameOptions::default()
    };
    let plans = plan_renames(&sorted, &options).unwrap();
    let new_titles: Vec<&str> = plans.iter().map(|p| p.new_title.as_str()).collect();
    assert_eq!(
        new_titles,
        vec!["凡人修仙传第一卷", "凡人修仙传第二卷", "凡人修仙传第三卷"]
    );
    assert!(plans.iter().all(|p| p.new_author == AuthorChange::Unchanged));
}

#[test]
fn planning_is_deterministic() {
    let books: Vec<BookItem> = (1..=12)
        .map(|i| BookItem::new(i, format!("Saga Vol. {i}")))
        .collect();
    let options = RenameOptions {
        base_title: infer_base_title(&titles(&books)),
        author: Some("Someone".to_string()),
        ..RenameOptions::default()
    };

    let first = plan_renames(&books, &options).unwrap();
    let second = plan_renames(&books, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first[0].new_title, "Saga01");
    assert_eq!(first[11].new_title, "Saga12");
}

#[test]
fn column_batches_with_mismatched_lengths_are_rejected() {
    let err = BookItem::from_columns(&[1, 2, 3], &["a".into(), "b".into()], &[]).unwrap_err();
    assert!(matches!(err, NormalizeError::InconsistentBatchLengths { .. }));
}

#[test]
fn loads_plain_title_list() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "海贼王 03\t尾田荣一郎").unwrap();
    writeln!(file, "海贼王 01\t尾田荣一郎").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "海贼王 02\t尾田荣一郎").unwrap();

    let books = load_books(file.path()).unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(books[2].id.0, 4);
    assert_eq!(infer_base_title(&titles(&books)), "海贼王");
}

#[test]
fn loads_json_book_array() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"id": 11, "title": "Dune (2)", "authors": ["Frank Herbert"], "tags": ["sf"]}},
            {{"id": 10, "title": "Dune (1)", "publisher": "Chilton",
              "pubdate": "1965-08-01T00:00:00Z"}}
        ]"#
    )
    .unwrap();

    let books = load_books(file.path()).unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].tags, vec!["sf"]);
    assert!(books[1].pubdate.is_some());

    let ids: Vec<u64> = sort_by_volume(books).iter().map(|e| e.item.id.0).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn broken_json_is_an_error() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "[{{\"id\": ").unwrap();
    assert!(matches!(load_books(file.path()), Err(NormalizeError::Json(_))));
}

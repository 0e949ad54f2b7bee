use std::io::{self, Write};

use color_eyre::Result;
use tracing::info;

use crate::align::infer_base_title;
use crate::args::{Command, Options, RenameArgs};
use crate::book::{collect_authors, BookItem};
use crate::loader::load_books;
use crate::rename::{plan_renames, preview_renames, RenameOptions, RenamePlan};
use crate::sorter::sort_by_volume;

#[derive(Debug)]
pub struct App {
    options: Options,
}

impl App {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    pub fn run_to(&self, out: &mut impl Write) -> Result<()> {
        match &self.options.command {
            Command::Infer { file_path } => {
                let books = load_books(file_path)?;
                writeln!(out, "{}", infer_base_title(&titles(&books)))?;
            }
            Command::Sort { file_path } => {
                for entry in sort_by_volume(load_books(file_path)?) {
                    writeln!(out, "{}\t{}\t{}", entry.item.id, entry.volume, entry.item.title)?;
                }
            }
            Command::Plan { rename, records } => {
                let (books, options) = prepare(rename)?;
                let plans = plan_renames(&books, &options)?;
                if *records {
                    let updated: Vec<BookItem> = plans
                        .iter()
                        .zip(&books)
                        .map(|(plan, book)| plan.apply(book))
                        .collect();
                    serde_json::to_writer_pretty(&mut *out, &updated)?;
                } else {
                    serde_json::to_writer_pretty(&mut *out, &plans)?;
                }
                writeln!(out)?;
            }
            Command::Preview { rename } => {
                let (books, options) = prepare(rename)?;
                let plans = preview_renames(&books, &options)?;
                render_preview(out, &books, &plans)?;
            }
        }
        Ok(())
    }
}

fn titles(books: &[BookItem]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

/// Loads the batch, orders it and fills in the base title if none was given.
fn prepare(args: &RenameArgs) -> Result<(Vec<BookItem>, RenameOptions)> {
    let mut books = load_books(&args.file_path)?;
    if !args.keep_order {
        books = sort_by_volume(books).into_iter().map(|e| e.item).collect();
    }

    let base_title = match &args.title {
        Some(title) => title.clone(),
        None => {
            let inferred = infer_base_title(&titles(&books));
            info!(base = %inferred, "using inferred base title");
            inferred
        }
    };

    let options = RenameOptions {
        base_title,
        author: args.author.clone(),
        clear: args.clear_flags(),
        style: args.style,
    };
    Ok((books, options))
}

fn render_preview(out: &mut impl Write, books: &[BookItem], plans: &[RenamePlan]) -> Result<()> {
    let authors = collect_authors(books);
    if !authors.is_empty() {
        writeln!(out, "authors: {}", authors.join("、"))?;
    }

    let width = plans.len().to_string().len();
    for plan in plans {
        writeln!(
            out,
            "{:>width$}. {} -> {}",
            plan.index, plan.old_title, plan.new_title
        )?;
    }
    Ok(())
}

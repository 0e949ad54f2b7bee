use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::numeral::NumberingStyle;
use crate::rename::ClearFlags;

#[derive(Parser, Debug)]
#[command(name = "volnorm", version, about = "Normalize volume numbering across a book series")]
pub struct Options {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the base title shared by the books
    Infer {
        /// Title list (one per line) or JSON book array
        file_path: PathBuf,
    },
    /// List the books ordered by detected volume
    Sort {
        /// Title list (one per line) or JSON book array
        file_path: PathBuf,
    },
    /// Print rename plans as JSON
    Plan {
        #[command(flatten)]
        rename: RenameArgs,
        /// Emit the updated book records instead of the plans
        #[arg(long)]
        records: bool,
    },
    /// Show old and new titles side by side
    Preview {
        #[command(flatten)]
        rename: RenameArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Title list (one per line) or JSON book array
    pub file_path: PathBuf,

    /// Base title; inferred from the books when omitted
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author to set on every book; existing authors are kept when omitted
    #[arg(short, long)]
    pub author: Option<String>,

    /// Volume numbering style
    #[arg(short, long, value_enum, default_value_t = NumberingStyle::Numeric)]
    pub style: NumberingStyle,

    /// Keep existing tags
    #[arg(long)]
    pub keep_tags: bool,

    /// Keep existing series and series index
    #[arg(long)]
    pub keep_series: bool,

    /// Keep existing publisher
    #[arg(long)]
    pub keep_publisher: bool,

    /// Number books in file order instead of sorting by detected volume
    #[arg(long)]
    pub keep_order: bool,
}

impl RenameArgs {
    pub fn clear_flags(&self) -> ClearFlags {
        ClearFlags {
            tags: !self.keep_tags,
            series: !self.keep_series,
            publisher: !self.keep_publisher,
        }
    }
}

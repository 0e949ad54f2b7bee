//! Volume marker detection, base title inference and consistent renumbering
//! for books that belong to one series.
//!
//! The pipeline runs raw titles through [`volume`] to strip volume markers,
//! infers a shared base title with [`align`], orders the batch with
//! [`sorter`] and builds per-book [`rename::RenamePlan`]s. Nothing here
//! touches storage; the host applies the plans.

pub mod align;
pub mod app;
pub mod args;
pub mod book;
pub mod error;
pub mod loader;
pub mod numeral;
pub mod rename;
pub mod sorter;
pub mod volume;

pub use align::infer_base_title;
pub use book::{BookId, BookItem};
pub use error::{NormalizeError, Result};
pub use numeral::NumberingStyle;
pub use rename::{plan_renames, preview_renames, AuthorChange, ClearFlags, RenameOptions, RenamePlan};
pub use sorter::sort_by_volume;
pub use volume::{extract_volume, split_volume, VolumeMarker};

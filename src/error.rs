use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("unparseable numeral: {0}")]
    UnparseableNumeral(String),

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("inconsistent batch lengths: ids={ids}, titles={titles}, authors={authors}")]
    InconsistentBatchLengths {
        ids: usize,
        titles: usize,
        authors: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid book list: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

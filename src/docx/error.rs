use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("document package has no {0} part")]
    MissingPart(String),

    #[error("document part has no {0} element")]
    MissingElement(&'static str),

    #[error("failed to replace document: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, DocxError>;

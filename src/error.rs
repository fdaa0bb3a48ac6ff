//! Typed error surface for every fallible public operation.
//!
//! The engine never panics on bad-but-reachable input (malformed persisted
//! XML, an out-of-range history depth, a clipboard payload in an unsupported
//! format). Each such condition gets its own variant here; callers match on
//! it, and the same information is also logged at the point of failure via
//! the `log` facade so a host application gets a trace even if it discards
//! the `Result`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no item with id {0} exists in this container")]
    UnknownItem(u64),

    #[error("history is empty; nothing to undo")]
    NothingToUndo,

    #[error("history is empty; nothing to redo")]
    NothingToRedo,

    #[error("an eraser micro-step is already in progress")]
    EraserStepAlreadyOpen,

    #[error("no eraser micro-step is in progress")]
    NoEraserStepOpen,

    #[error("selection operation requires at least one selected item")]
    EmptySelection,

    #[error("item {0} does not carry a stroke style (color/thickness)")]
    NoStrokeStyle(u64),

    #[error("item {0} is not a text-bearing item")]
    NotATextItem(u64),

    #[error("clipboard payload is not in a recognized format")]
    UnrecognizedClipboardFormat,

    #[error("failed to decode raster image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("failed to parse annotation XML: {0}")]
    XmlParse(String),

    #[error("failed to write annotation XML: {0}")]
    XmlWrite(String),

    #[error("failed to read Xournal document: {0}")]
    XournalParse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("rendering cache worker is unavailable (thread exited or timed out)")]
    CacheWorkerUnavailable,

    #[error("rendering backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

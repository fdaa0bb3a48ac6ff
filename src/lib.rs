//! slidebound: an annotation and presentation engine for PDF slide decks.
//!
//! A host application supplies a [`backend::PdfBackend`] (page sizes,
//! annotations, links, rendered pixmaps) and drives pointer input through
//! [`scene::SlideScene`]; everything else — drawing tool state, undo/redo
//! history, shape recognition, slide transitions, media playback windows,
//! and the rendering cache — lives here.

pub mod backend;
pub mod cache;
pub mod config;
pub mod container;
pub mod draw;
pub mod error;
pub mod item;
pub mod media;
pub mod paths;
pub mod persist;
pub mod recognizer;
pub mod scene;
pub mod tool;
pub mod transitions;
pub mod util;
pub mod view;

pub use config::Config;
pub use error::{EngineError, Result};

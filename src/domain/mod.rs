//! Domain types for plugin identity
//!
//! Pure types without any I/O concerns.

mod kind;

pub use kind::{KindError, PluginIdentifier, PluginKind};

//! Module containing concrete implementations from the [core](crate::core) module.

/// Document source implementations.
pub mod document;

/// Text embedder implementations.
pub mod embedder;

/// Language model implementations.
pub mod llm;

/// Document and chunk store implementations.
pub mod store;

/// Application state configuration.
pub mod state;

/// HTTP server implementation.
pub mod server;

#[cfg(test)]
pub mod test;

//! The core module defines the business logic of pdfrag.
//! It provides the traits and models upstream adapters need to implement.

pub mod chunk;
pub mod document;
pub mod embedder;
pub mod llm;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;

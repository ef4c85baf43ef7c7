// file: src/exporter/mod.rs
// description: document export module exports
// reference: internal module structure

pub mod markdown;

pub use markdown::{MarkdownRenderer, write_document};

//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code and id generation, collision retry
//! - [`url_normalizer`] - URL normalization and validation

pub mod code_generator;
pub mod url_normalizer;

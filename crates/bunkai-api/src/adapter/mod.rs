//! Adapter module

mod json_lines;

pub use json_lines::JsonLinesAdapter;

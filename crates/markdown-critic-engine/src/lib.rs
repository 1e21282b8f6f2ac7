pub mod critic;
pub mod io;
pub mod render;

// Re-export key types for easier usage
pub use critic::*;
pub use render::markdown_to_html;

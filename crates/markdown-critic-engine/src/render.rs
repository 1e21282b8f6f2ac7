//! Markdown rendering stage that consumes the transducer's output.
//!
//! The transducer knows nothing about Markdown; this is glue for callers
//! that want HTML in one step. Inline HTML produced by the transducer is
//! passed through by the renderer untouched.

use pulldown_cmark::{Options, Parser, html};

/// Renders CommonMark (plus tables, strikethrough, footnotes and task lists)
/// to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, parser);
    out
}

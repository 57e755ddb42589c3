//! Markdown → HTML for server-provided text (analysis and chat replies).

use pulldown_cmark::{html, Event, Options, Parser};
use serde::Deserialize;
use std::borrow::Cow;

// Task-list markers travel through the sanitizer as private-use text and are
// turned back into checkboxes afterwards, so `<input>` never has to be allowed.
const MARKER_START: char = '\u{E000}';
const MARKER_END: char = '\u{E001}';
const TASK_DONE: &str = "\u{E000}x\u{E001}";
const TASK_OPEN: &str = "\u{E000} \u{E001}";
const CHECKED_BOX: &str = r#"<input type="checkbox" checked="" disabled="" /> "#;
const EMPTY_BOX: &str = r#"<input type="checkbox" disabled="" /> "#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MarkdownOptions {
    /// Single newlines become `<br>`
    pub breaks: bool,
    /// Tables, strikethrough and task lists
    pub gfm: bool,
    /// Typographic quotes and dashes
    pub smartypants: bool,
    /// Run the output through an allow-list sanitizer
    pub sanitize: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
            smartypants: false,
            sanitize: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parser_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.options.gfm {
            opts.insert(Options::ENABLE_TABLES);
            opts.insert(Options::ENABLE_STRIKETHROUGH);
            opts.insert(Options::ENABLE_TASKLISTS);
            opts.insert(Options::ENABLE_GFM);
        }
        if self.options.smartypants {
            opts.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        opts
    }

    /// Render `source` to an HTML fragment. Deterministic for a given renderer.
    pub fn render(&self, source: &str) -> String {
        let breaks = self.options.breaks;
        let sanitize = self.options.sanitize;

        let source: Cow<'_, str> = if sanitize && source.contains(is_marker) {
            Cow::Owned(source.replace(is_marker, ""))
        } else {
            Cow::Borrowed(source)
        };

        let events = Parser::new_ext(&source, self.parser_options()).map(move |event| match event {
            Event::SoftBreak if breaks => Event::HardBreak,
            Event::TaskListMarker(done) if sanitize => {
                Event::Text((if done { TASK_DONE } else { TASK_OPEN }).into())
            }
            other => other,
        });

        let mut out = String::with_capacity(source.len() + source.len() / 2);
        html::push_html(&mut out, events);

        if sanitize {
            sanitize_html(&out)
                .replace(TASK_DONE, CHECKED_BOX)
                .replace(TASK_OPEN, EMPTY_BOX)
        } else {
            out
        }
    }
}

fn is_marker(c: char) -> bool {
    c == MARKER_START || c == MARKER_END
}

/// Default ammonia allow-list plus code language classes. Form controls are never allowed.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tag_attributes("code", &["class"])
        .clean(html)
        .to_string()
}

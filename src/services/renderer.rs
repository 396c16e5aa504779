//! Output rendering.
//!
//! The coordinator produces plain text; a [`Renderer`] turns it into markup
//! and is asked to `typeset` whenever the displayed output changes.

/// Shown while there is no output.
pub const OUTPUT_PLACEHOLDER: &str =
    "<div class=\"placeholder\">The translation will appear here</div>";

/// Markdown/math typesetting collaborator.
pub trait Renderer: Send + Sync {
    /// Converts output text into display markup.
    fn render(&self, text: &str) -> String;

    /// Re-typesets math after the displayed output changed.
    fn typeset(&self) {}
}

/// Markup for `text`: the placeholder when empty, the renderer's markup when
/// one is present, otherwise the literal text with newlines as `<br>`.
pub fn render_output(text: &str, renderer: Option<&dyn Renderer>) -> String {
    if text.is_empty() {
        return OUTPUT_PLACEHOLDER.to_string();
    }
    match renderer {
        Some(renderer) => renderer.render(text),
        None => render_plain(text),
    }
}

pub fn render_plain(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// CommonMark renderer with tables, strikethrough and `$`/`$$` math spans.
#[cfg(feature = "markdown")]
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

#[cfg(feature = "markdown")]
impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_MATH;
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(text, options));
        out
    }

    fn typeset(&self) {
        tracing::trace!("Math typeset requested");
    }
}

use std::collections::HashMap;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::escape_html;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::blog::TocEntry;

const THEME: &str = "base16-ocean.dark";

static RENDERER: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Syntax and theme sets are expensive to load, so one renderer is shared.
pub struct MarkdownRenderer {
    syntaxset: SyntaxSet,
    themeset: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntaxset: SyntaxSet::load_defaults_newlines(),
            themeset: ThemeSet::load_defaults(),
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.themeset
            .themes
            .get(THEME)
            .or_else(|| self.themeset.themes.values().next())
    }

    fn highlight_code(&self, lang: Option<&str>, code: &str) -> String {
        let syntax = lang
            .and_then(|l| self.syntaxset.find_syntax_by_token(l))
            .unwrap_or_else(|| self.syntaxset.find_syntax_plain_text());
        self.theme()
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntaxset, syntax, theme).ok()
            })
            .unwrap_or_else(|| plain_code_block(code))
    }

    /// Renders markdown to HTML with highlighted code blocks and anchored
    /// h2/h3 headings, collecting those headings into a table of contents.
    pub fn render(&self, content: &str) -> Rendered {
        let mut toc = Vec::new();
        let mut ids = HashMap::<String, usize>::new();
        let mut out = Vec::new();

        let mut code: Option<(Option<String>, String)> = None;
        let mut heading: Option<(HeadingLevel, Vec<Event<'_>>, String)> = None;

        for event in Parser::new_ext(content, Options::all()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, text)) = code.take() {
                        let html = self.highlight_code(lang.as_deref(), &text);
                        out.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(t) if code.is_some() => {
                    if let Some((_, text)) = code.as_mut() {
                        text.push_str(&t);
                    }
                }
                Event::Start(Tag::Heading { level, .. })
                    if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) =>
                {
                    heading = Some((level, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    if let Some((level, inner, title)) = heading.take() {
                        let id = unique_id(&mut ids, slugify(&title));
                        toc.push(TocEntry {
                            level: if level == HeadingLevel::H2 { 2 } else { 3 },
                            id: id.clone(),
                            title: title.trim().to_string(),
                        });
                        out.push(Event::Start(Tag::Heading {
                            level,
                            id: Some(CowStr::from(id)),
                            classes: Vec::new(),
                            attrs: Vec::new(),
                        }));
                        out.extend(inner);
                        out.push(Event::End(TagEnd::Heading(level)));
                    }
                }
                e => match heading.as_mut() {
                    Some((_, inner, title)) => {
                        if let Event::Text(t) | Event::Code(t) = &e {
                            title.push_str(t);
                        }
                        inner.push(e);
                    }
                    None => out.push(e),
                },
            }
        }

        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, out.into_iter());
        Rendered { html, toc }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_markdown(content: &str) -> Rendered {
    RENDERER.render(content)
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn unique_id(ids: &mut HashMap<String, usize>, base: String) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };
    let seen = ids.entry(base.clone()).or_insert(0);
    let id = if *seen == 0 {
        base
    } else {
        format!("{base}-{seen}")
    };
    *seen += 1;
    id
}

fn plain_code_block(code: &str) -> String {
    let mut html = String::with_capacity(code.len() + 24);
    html.push_str("<pre><code>");
    // writing into a String never fails
    let _ = escape_html(&mut html, code);
    html.push_str("</code></pre>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Problem"), "the-problem");
        assert_eq!(slugify("  What's new? (2024) "), "what-s-new-2024");
        assert_eq!(slugify("★★★"), "");
    }

    #[test]
    fn test_headings_get_ids_and_toc() {
        let rendered = render_markdown("# Title\n\n## Setup\n\ntext\n\n### `cargo` usage\n\n## Setup\n");
        let ids = rendered.toc.iter().map(|t| t.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["setup", "cargo-usage", "setup-1"]);
        assert_eq!(rendered.toc[1].level, 3);
        assert_eq!(rendered.toc[1].title, "cargo usage");
        assert!(rendered.html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert!(rendered.html.contains(r#"<h2 id="setup-1">"#));
        assert!(rendered.html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_code_is_highlighted() {
        let rendered = render_markdown("```rust\nfn main() {}\n```\n");
        assert!(rendered.html.contains("<pre style="));
        assert!(!rendered.html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let rendered = render_markdown("```notalanguage\n<tag>\n```\n");
        assert!(rendered.html.contains("&lt;tag&gt;"));
    }

    #[test]
    fn test_plain_code_block_escapes() {
        assert_eq!(
            plain_code_block(r#"<a href="x">&</a>"#),
            "<pre><code>&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;</code></pre>"
        );
        assert_eq!(plain_code_block("let x = 1;"), "<pre><code>let x = 1;</code></pre>");
    }
}

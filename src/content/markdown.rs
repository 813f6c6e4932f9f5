//! Markdown rendering with syntax highlighting

use anyhow::{anyhow, Context, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxDefinition, SyntaxSet};

use crate::config::HighlightConfig;
use crate::helpers::{collapse_whitespace, escape_html};

/// Grammars missing from syntect's default set
const EXTRA_SYNTAXES: &[(&str, &str)] = &[("Dart", include_str!("syntaxes/Dart.sublime-syntax"))];

fn markdown_options() -> Options {
    // Front-matter is split off before rendering, so no metadata blocks here
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
}

/// Default syntaxes plus the bundled extras
fn load_syntax_set() -> Result<SyntaxSet> {
    let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
    for (name, source) in EXTRA_SYNTAXES {
        let syntax = SyntaxDefinition::load_from_str(source, true, None)
            .with_context(|| format!("invalid bundled {} syntax", name))?;
        builder.add(syntax);
    }
    Ok(builder.build())
}

/// Text content of a Markdown document, without markup or entities.
///
/// Block boundaries become single spaces.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::End(
                TagEnd::Emphasis
                | TagEnd::Strong
                | TagEnd::Strikethrough
                | TagEnd::Link
                | TagEnd::Image,
            ) => {}
            Event::End(_) | Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a renderer using the named syntect theme
    pub fn new(theme: &str, line_numbers: bool) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.remove(theme).ok_or_else(|| {
            let mut known: Vec<_> = theme_set.themes.keys().cloned().collect();
            known.sort();
            anyhow!(
                "unknown highlight theme `{}` (available: {})",
                theme,
                known.join(", ")
            )
        })?;

        Ok(Self {
            syntax_set: load_syntax_set()?,
            theme,
            line_numbers,
        })
    }

    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        Self::new(&config.theme, config.line_number)
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, markdown_options());

        let mut events: Vec<Event> = Vec::new();
        // (language, collected source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',')
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code_block.take() {
                        let highlighted = self.highlight_code(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, source)) = code_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                other => {
                    if code_block.is_none() {
                        events.push(other);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang else {
            return format!("<pre><code>{}</code></pre>", escape_html(code));
        };

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang));

        let highlighted = syntax.and_then(|syntax| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme).ok()
        });
        let lang = escape_html(lang);

        match highlighted {
            Some(highlighted) if self.line_numbers => {
                self.add_line_numbers(code, &highlighted, &lang)
            }
            Some(highlighted) => {
                format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted)
            }
            None => {
                tracing::debug!("No syntax for code block language `{}`", lang);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang,
                    escape_html(code)
                )
            }
        }
    }

    /// Put highlighted code next to a line-number gutter
    fn add_line_numbers(&self, code: &str, highlighted: &str, lang: &str) -> String {
        let gutter = (1..=code.lines().count().max(1))
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang, gutter, highlighted
        )
    }
}

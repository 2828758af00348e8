//! Minimal markdown-to-HTML for chat replies.
//!
//! Not a CommonMark implementation. Supports fenced code blocks, inline
//! code, bold, italics, http(s) links, unordered lists and paragraphs, in a
//! fixed non-recursive order: fenced blocks are lifted out first, lines are
//! grouped into lists and paragraphs with inline formatting applied to each
//! line on its own, then the lifted code is put back untouched.

use regex::{Captures, Regex};
use std::sync::OnceLock;

const BLOCK_MARK: char = '\u{E000}';
const INLINE_MARK: char = '\u{E001}';

struct Patterns {
    fenced: Regex,
    inline_code: Regex,
    bold: Regex,
    italic: Regex,
    link: Regex,
    block_slot: Regex,
    inline_slot: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        fenced: Regex::new(r"(?s)```(?:([A-Za-z0-9_+-]+)[ \t]*\n)?(.*?)```").expect("fenced pattern"),
        inline_code: Regex::new(r"`([^`\n]+)`").expect("inline code pattern"),
        bold: Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"),
        italic: Regex::new(r"\*([^*\n]+)\*").expect("italic pattern"),
        link: Regex::new(r"\[([^\]\n]+)\]\((https?://[^\s)]+)\)").expect("link pattern"),
        block_slot: Regex::new("\u{E000}(\\d+)\u{E000}").expect("block slot pattern"),
        inline_slot: Regex::new("\u{E001}(\\d+)\u{E001}").expect("inline slot pattern"),
    })
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_markdown(input: &str) -> String {
    let p = patterns();
    let escaped = escape_html(input.trim());

    let mut code_blocks: Vec<String> = Vec::new();
    let lifted = p
        .fenced
        .replace_all(&escaped, |caps: &Captures| {
            let code = caps.get(2).map_or("", |m| m.as_str()).trim_matches('\n');
            let html = match caps.get(1) {
                Some(lang) => format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    lang.as_str(),
                    code
                ),
                None => format!("<pre><code>{}</code></pre>", code),
            };
            code_blocks.push(html);
            format!("\n{m}{}{m}\n", code_blocks.len() - 1, m = BLOCK_MARK)
        })
        .into_owned();

    let html = wrap_blocks(&lifted);
    p.block_slot
        .replace_all(&html, |caps: &Captures| slot(&code_blocks, &caps[1]))
        .into_owned()
}

/// Inline code, bold, italics and links within a single line.
fn render_inline(line: &str) -> String {
    let p = patterns();
    let mut inline_code: Vec<String> = Vec::new();
    let html = p
        .inline_code
        .replace_all(line, |caps: &Captures| {
            inline_code.push(format!("<code>{}</code>", &caps[1]));
            format!("{m}{}{m}", inline_code.len() - 1, m = INLINE_MARK)
        })
        .into_owned();
    let html = p.bold.replace_all(&html, "<strong>$1</strong>");
    let html = p.italic.replace_all(&html, "<em>$1</em>");
    let html = p.link.replace_all(
        &html,
        r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#,
    );
    p.inline_slot
        .replace_all(&html, |caps: &Captures| slot(&inline_code, &caps[1]))
        .into_owned()
}

fn slot(stash: &[String], index: &str) -> String {
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| stash.get(i))
        .cloned()
        .unwrap_or_default()
}

fn wrap_blocks(text: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    fn flush_paragraph(html: &mut String, paragraph: &mut Vec<String>) {
        if !paragraph.is_empty() {
            html.push_str("<p>");
            html.push_str(&paragraph.join("<br>"));
            html.push_str("</p>");
            paragraph.clear();
        }
    }

    fn flush_list(html: &mut String, items: &mut Vec<String>) {
        if !items.is_empty() {
            html.push_str("<ul>");
            for item in items.iter() {
                html.push_str("<li>");
                html.push_str(item);
                html.push_str("</li>");
            }
            html.push_str("</ul>");
            items.clear();
        }
    }

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            flush_list(&mut html, &mut items);
        } else if line.starts_with(BLOCK_MARK) && line.ends_with(BLOCK_MARK) {
            flush_paragraph(&mut html, &mut paragraph);
            flush_list(&mut html, &mut items);
            html.push_str(line);
        } else if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            flush_paragraph(&mut html, &mut paragraph);
            items.push(render_inline(item.trim()));
        } else {
            flush_list(&mut html, &mut items);
            paragraph.push(render_inline(line));
        }
    }
    flush_paragraph(&mut html, &mut paragraph);
    flush_list(&mut html, &mut items);
    html
}

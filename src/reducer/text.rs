use scraper::{ElementRef, Html, Node};

/// Tags whose whole subtree is never part of the reduced text
pub const EXCLUDED_TAGS: [&str; 7] = ["head", "script", "style", "img", "iframe", "nav", "button"];

/// Detach every element of the exclusion set from the tree.
pub fn remove_excluded(document: &mut Html) {
    let ids: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| is_excluded(el.name()))
        })
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Escape every `<` that does not open a tag or comment closed further on.
///
/// A tag counts as closed when a `>` follows before the next unquoted `<`.
/// A stray bracket then stays text instead of opening an element that
/// swallows the rest of the page.
pub fn escape_stray_brackets(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset;
        match markup_end(bytes, start) {
            Some(end) => pos = end,
            None => {
                out.push_str(&html[copied..start]);
                out.push_str("&lt;");
                copied = start + 1;
                pos = start + 1;
            }
        }
    }
    out.push_str(&html[copied..]);
    out
}

/// End offset of the tag or comment opening at `start`, if it is closed
fn markup_end(bytes: &[u8], start: usize) -> Option<usize> {
    let rest = &bytes[start..];
    if rest.starts_with(b"<!--") {
        return rest
            .windows(3)
            .skip(4)
            .position(|w| w == b"-->")
            .map(|i| start + i + 4 + 3);
    }

    match rest.get(1) {
        Some(b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?') => {}
        _ => return None,
    }

    // Quotes only delimit attribute values, i.e. right after `=`
    let mut quote: Option<u8> = None;
    let mut after_equals = false;
    for (i, &b) in rest.iter().enumerate().skip(1) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'>' => return Some(start + i + 1),
            b'<' => return None,
            b'"' | b'\'' if after_equals => {
                quote = Some(b);
                after_equals = false;
            }
            b'=' => after_equals = true,
            b if b.is_ascii_whitespace() => {}
            _ => after_equals = false,
        }
    }
    None
}

/// Text content of `document` with block boundaries as line breaks.
///
/// Inside text, a lone `\n` is also a line break while any longer run of
/// whitespace collapses to one space, so source indentation never splits a
/// line but already-reduced text keeps its lines. Empty lines are dropped.
pub fn structured_text(document: &Html) -> String {
    let mut lines = Lines::default();
    collect_text(&document.root_element(), &mut lines);
    lines.finish().join("\n")
}

#[derive(Default)]
struct Lines {
    done: Vec<String>,
    current: String,
}

impl Lines {
    fn push(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn break_line(&mut self) {
        for line in split_lines(&self.current) {
            let line = normalize_whitespace(line);
            if !line.is_empty() {
                self.done.push(line);
            }
        }
        self.current.clear();
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.done
    }
}

fn collect_text(element: &ElementRef, lines: &mut Lines) {
    let tag_name = element.value().name().to_lowercase();
    if is_excluded(&tag_name) {
        return;
    }

    if tag_name == "br" {
        lines.break_line();
        return;
    }

    let block = is_block_element(&tag_name);
    if block {
        lines.break_line();
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => lines.push(text),
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, lines);
                }
            }
            _ => {}
        }
    }

    if block {
        lines.break_line();
    }
}

fn is_excluded(tag: &str) -> bool {
    EXCLUDED_TAGS.iter().any(|excluded| tag.eq_ignore_ascii_case(excluded))
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "body"
            | "caption"
            | "dd"
            | "details"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "td"
            | "tfoot"
            | "th"
            | "tr"
            | "ul"
    )
}

/// Split on every `\n` that is a whitespace run of its own
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, _) in text.match_indices('\n') {
        let before = i > 0 && (bytes[i - 1] as char).is_ascii_whitespace();
        let after = bytes
            .get(i + 1)
            .is_some_and(|b| (*b as char).is_ascii_whitespace());
        if !before && !after {
            lines.push(&text[start..i]);
            start = i + 1;
        }
    }
    lines.push(&text[start..]);
    lines
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

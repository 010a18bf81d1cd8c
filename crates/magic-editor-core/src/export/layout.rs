//! Output formatting: readable line breaks between blocks.

use std::sync::OnceLock;

use regex::Regex;

/// Block closers followed by a blank line.
const BLOCK_CLOSERS: &[&str] = &[
    "</p>",
    "</h1>",
    "</h2>",
    "</h3>",
    "</h4>",
    "</ul>",
    "</ol>",
    "</blockquote>",
    "</pre>",
];

fn newline_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Put a blank line after every block closer.
pub fn break_after_blocks(html: &str) -> String {
    let mut out = html.to_owned();
    for closer in BLOCK_CLOSERS {
        out = out.replace(closer, &format!("{closer}\n\n"));
    }
    out
}

/// Pull a blank line that ends up right before `</div>` back up.
pub fn close_container_gaps(html: &str) -> String {
    html.replace("\n\n</div>", "</div>")
}

/// Put a blank line after every `</div>`.
pub fn break_after_containers(html: &str) -> String {
    html.replace("</div>", "</div>\n\n")
}

/// Collapse runs of three or more newlines to two.
pub fn collapse_blank_lines(html: &str) -> String {
    newline_run_re().replace_all(html, "\n\n").into_owned()
}

pub fn trim_document(html: &str) -> String {
    html.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_breaks() {
        assert_eq!(
            break_after_blocks("<h2>t</h2><p>a</p><ul><li>x</li></ul>"),
            "<h2>t</h2>\n\n<p>a</p>\n\n<ul><li>x</li></ul>\n\n"
        );
    }

    #[test]
    fn test_container_gap() {
        let html = break_after_blocks("<div><p>a</p></div>");
        assert_eq!(close_container_gaps(&html), "<div><p>a</p></div>");
        assert_eq!(
            break_after_containers("<div></div><div></div>"),
            "<div></div>\n\n<div></div>\n\n"
        );
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb\n\nc\n\n\n"), "a\n\nb\n\nc\n\n");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }
}

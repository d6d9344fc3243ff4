//! Source neutralization for embedded server-side script.
//!
//! PHP files are markup with `<?php ... ?>` (or `<?= ... ?>`) regions the
//! DOM engine cannot parse. Each region is rewritten into an inert HTML
//! comment carrying exactly as many newline characters as the original
//! region, so the rewritten text is line-position-compatible with the
//! original: every line break outside a replaced region keeps its offset,
//! and range reconciliation can keep working in original-text coordinates.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Opening marker, arbitrary content including newlines, closing marker.
/// Non-greedy, dot-matches-newline. An unterminated opener has no match and
/// the text is left untouched rather than consumed to end-of-file.
static EMBEDDED_SCRIPT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    match Regex::new(r"(?s)<\?(?:php\b|=)?.*?\?>") {
        Ok(pattern) => Some(pattern),
        Err(error) => {
            tracing::warn!(%error, "embedded-script pattern failed to compile");
            None
        }
    }
});

/// Rewrite embedded server-side script regions into inert markup.
///
/// Line count and the offsets of all untouched line breaks are preserved;
/// byte length is not. If the rewrite machinery is unavailable the original
/// text is returned unchanged: a degraded analysis beats none.
#[must_use]
pub fn neutralize(text: &str) -> Cow<'_, str> {
    let Some(pattern) = EMBEDDED_SCRIPT.as_ref() else {
        return Cow::Borrowed(text);
    };
    pattern.replace_all(text, |captures: &regex::Captures<'_>| {
        let newlines = captures[0].matches('\n').count();
        format!("<!--{}-->", "\n".repeat(newlines))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_count(text: &str) -> usize {
        text.matches('\n').count() + 1
    }

    #[test]
    fn test_plain_html_untouched() {
        let html = "<html>\n<body><p>hi</p></body>\n</html>";
        assert_eq!(neutralize(html), html);
    }

    #[test]
    fn test_php_block_replaced_with_comment() {
        let out = neutralize("<p><?php echo $x; ?></p>");
        assert_eq!(out, "<p><!----></p>");
    }

    #[test]
    fn test_short_echo_tag_replaced() {
        let out = neutralize("<li><?= $item ?></li>");
        assert_eq!(out, "<li><!----></li>");
    }

    #[test]
    fn test_line_breaks_preserved_inside_block() {
        let src = "<div>\n<?php\n$a = 1;\n$b = 2;\n?>\n</div>";
        let out = neutralize(src);
        assert_eq!(line_count(&out), line_count(src));
        assert_eq!(out, "<div>\n<!--\n\n\n-->\n</div>");
    }

    #[test]
    fn test_untouched_region_offsets_unchanged() {
        let src = "<?php x(); ?>\n<img src=\"a.png\">\n";
        let out = neutralize(src);
        // Everything after the first line break keeps its line/column.
        let src_tail = &src[src.find('\n').unwrap_or(0)..];
        let out_tail = &out[out.find('\n').unwrap_or(0)..];
        assert_eq!(src_tail, out_tail);
    }

    #[test]
    fn test_multiple_blocks() {
        let out = neutralize("<?php a(); ?><b>x</b><?= $y ?>");
        assert_eq!(out, "<!----><b>x</b><!---->");
    }

    #[test]
    fn test_unterminated_opener_left_alone() {
        let src = "<p>ok</p>\n<?php broken(";
        assert_eq!(neutralize(src), src);
    }

    #[test]
    fn test_unterminated_opener_does_not_swallow_following_block() {
        // The non-greedy match pairs the opener with the nearest closer;
        // legitimate markup after the closer survives.
        let src = "<?php a();\nb(); ?><img>";
        assert_eq!(neutralize(src), "<!--\n--><img>");
    }

    #[test]
    fn test_line_accounting_is_idempotent_not_text() {
        let src = "<?php\n1;\n2;\n3;\n4;\n?>";
        let first = neutralize(src).into_owned();
        let second = neutralize(&first).into_owned();
        assert_ne!(first.len(), src.len());
        assert_eq!(line_count(&first), line_count(src));
        assert_eq!(line_count(&second), line_count(src));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(neutralize(""), "");
    }
}

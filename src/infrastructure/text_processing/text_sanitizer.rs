use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Cleans text pulled out of a PDF page: NFKC-normalizes ligatures, re-joins
/// words hyphenated across lines, drops control characters, collapses runs of
/// spaces and keeps at most one blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let joined = HYPHEN_NEWLINE.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<Vec<String>> = vec![Vec::new()];
    for line in joined.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if paragraphs.last().is_some_and(|p| !p.is_empty()) {
                paragraphs.push(Vec::new());
            }
        } else if let Some(current) = paragraphs.last_mut() {
            current.push(collapsed);
        }
    }

    paragraphs
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

use regex::Regex;
use tracing::trace;

/// A named extraction strategy. Cascades are ordered slices of these;
/// the first pattern that produces something wins, and the winner's name
/// shows up in trace output so pattern-order bugs are diagnosable.
pub(crate) struct LabeledPattern {
    pub name: &'static str,
    pub pattern: &'static str,
}

// Headers that terminate a section: the next numbered block, the copy-paste
// agent block, or a fence opening.
const NEXT_BLOCK: &str = "(?i)(?:БЛОК|BLOCK)\\s*\\d|🤖|```";

// Invalid patterns are skipped rather than failing the whole cascade.
pub(crate) fn compile(p: &LabeledPattern) -> Option<Regex> {
    Regex::new(p.pattern).ok()
}

/// First pattern whose capture group 1 is non-empty wins. Takes
/// (name, pattern) pairs so callers can build patterns at runtime; returns
/// the trimmed capture plus its end offset in `text` for follow-up scans.
pub(crate) fn first_capture(text: &str, patterns: &[(&str, String)]) -> Option<(String, usize)> {
    for (name, pattern) in patterns {
        let Some(re) = Regex::new(pattern).ok() else { continue };
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                let s = m.as_str().trim();
                if !s.is_empty() {
                    trace!(strategy = *name, "pattern matched");
                    return Some((s.to_string(), m.end()));
                }
            }
        }
    }
    None
}

/// Locate a labeled section: the slice from the first matching header up to
/// the next major block header (or the end of input).
pub(crate) fn locate_section<'a>(text: &'a str, headers: &[LabeledPattern]) -> Option<&'a str> {
    for p in headers {
        let Some(re) = compile(p) else { continue };
        if let Some(m) = re.find(text) {
            let rest = &text[m.end()..];
            let end = Regex::new(NEXT_BLOCK)
                .ok()
                .and_then(|nb| nb.find(rest))
                .map(|n| m.end() + n.start())
                .unwrap_or(text.len());
            trace!(strategy = p.name, start = m.start(), end, "section located");
            return Some(&text[m.start()..end]);
        }
    }
    None
}

/// Like `locate_section` but runs all the way to the end of input. Used for
/// trailing blocks (master prompt) that are assumed to close the document.
pub(crate) fn locate_trailing<'a>(text: &'a str, headers: &[LabeledPattern]) -> Option<&'a str> {
    for p in headers {
        let Some(re) = compile(p) else { continue };
        if let Some(m) = re.find(text) {
            trace!(strategy = p.name, start = m.start(), "trailing section located");
            return Some(&text[m.start()..]);
        }
    }
    None
}

/// A fixed-size byte window after `start`, clamped to char boundaries so
/// multi-byte (Cyrillic, emoji) input can never panic a slice.
pub(crate) fn window(text: &str, start: usize, len: usize) -> &str {
    let start = clamp_boundary(text, start);
    let end = clamp_boundary(text, start.saturating_add(len));
    &text[start..end]
}

fn clamp_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Strip `[TAG_NAME]`-style markers left over from the scene block format.
pub(crate) fn strip_bracket_tags(text: &str) -> String {
    match Regex::new(r"\[[A-Z_0-9]+\]") {
        Ok(re) => re.replace_all(text, "").trim().to_string(),
        Err(_) => text.trim().to_string(),
    }
}

/// First integer appearing in `text`, if any.
pub(crate) fn first_int(text: &str) -> Option<u32> {
    let re = Regex::new(r"\d+").ok()?;
    re.find(text)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_capture_respects_order() {
        let patterns = [
            ("quoted", "\"([^\"]+)\"".to_string()),
            ("any", "(.+)".to_string()),
        ];
        let (text, end) = first_capture("say \"hello\" now", &patterns).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(end, 10); // end of the capture, before the closing quote
    }

    #[test]
    fn first_capture_skips_empty_captures() {
        let patterns = [
            ("empty", "x(y*)".to_string()),
            ("word", "(\\w+)".to_string()),
        ];
        let (text, _) = first_capture("x abc", &patterns).unwrap();
        assert_eq!(text, "abc");
    }

    #[test]
    fn section_stops_at_next_block() {
        let headers = [LabeledPattern { name: "b1", pattern: "(?i)BLOCK\\s*1" }];
        let text = "intro\nBLOCK 1: hooks\nA) something\nBLOCK 2: scenes\n";
        let section = locate_section(text, &headers).unwrap();
        assert!(section.contains("A) something"));
        assert!(!section.contains("BLOCK 2"));
    }

    #[test]
    fn window_never_splits_multibyte_chars() {
        let text = "аб".repeat(300);
        let w = window(&text, 1, 400);
        assert!(!w.is_empty());
    }

    #[test]
    fn bracket_tags_are_stripped() {
        assert_eq!(strip_bracket_tags("[SCENE_END] hello [TAG_1]"), "hello");
    }
}

use super::HashtagSplit;
use super::strategy::{self, LabeledPattern};
use crate::models::ParsedHashtags;
use regex::Regex;
use tracing::debug;

const SECTION_HEADERS: &[LabeledPattern] = &[
    // 🏷 without the variation selector matches both emoji forms
    LabeledPattern { name: "tag-emoji", pattern: r"🏷[^\n]*" },
    LabeledPattern {
        name: "hashtag-engine",
        pattern: r"(?i)(?:smart\s+)?hashtag\s+(?:engine|cloud)[^\n]*",
    },
    LabeledPattern { name: "generic-header", pattern: r"(?i)(?:hashtags?|хэштеги|хештеги)[^\n]*" },
];

// Category sub-labels inside a hashtag section.
const CATEGORY_LABELS: [(&str, &str); 3] = [
    ("broad", r"(?i)(?:широк\w*|broad|high[\s\-]?volume|массов\w*)"),
    ("niche", r"(?i)(?:нишев\w*|niche|targeted?)"),
    ("trending", r"(?i)(?:тренд\w*|trending|алгоритм\w*|algorithm|boost)"),
];

// Word chars here include Cyrillic; the regex crate's \w is Unicode-aware.
const TAG_PATTERN: &str = r"#(\w+)";

pub(crate) fn extract_hashtags(content: &str, split: HashtagSplit) -> Option<ParsedHashtags> {
    let section = strategy::locate_section(content, SECTION_HEADERS);

    let result = match section {
        Some(section) => {
            let mut tags = labeled_categories(section);
            if tags.is_empty() {
                // Header existed but no sub-labels: positional slice scoped
                // to the section, then the whole document as a last resort.
                tags = positional_slice(&collect_tags(section), split);
            }
            if tags.is_empty() {
                tags = positional_slice(&collect_tags(content), split);
            }
            tags
        }
        None => positional_slice(&collect_tags(content), split),
    };

    if result.is_empty() {
        return None;
    }
    debug!(
        broad = result.broad.len(),
        niche = result.niche.len(),
        trending = result.trending.len(),
        "hashtags extracted"
    );
    Some(result)
}

fn collect_tags(text: &str) -> Vec<String> {
    let Some(re) = Regex::new(TAG_PATTERN).ok() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

// Category label -> run of text until the next category label or section end.
fn labeled_categories(section: &str) -> ParsedHashtags {
    let mut marks: Vec<(&str, usize, usize)> = Vec::new();
    for (category, pattern) in CATEGORY_LABELS {
        let Some(re) = Regex::new(pattern).ok() else { continue };
        if let Some(m) = re.find(section) {
            marks.push((category, m.start(), m.end()));
        }
    }
    marks.sort_by_key(|&(_, start, _)| start);

    // A label starting inside another label's match is part of that token
    // (the `\w*` patterns can swallow a compound word), not a real category
    // header. Keeping it would put a run start past its end.
    let mut kept: Vec<(&str, usize, usize)> = Vec::new();
    for mark in marks {
        let overlaps = kept.last().is_some_and(|&(_, _, prev_end)| mark.1 < prev_end);
        if !overlaps {
            kept.push(mark);
        }
    }

    let mut result = ParsedHashtags::default();
    for (idx, &(category, _, end)) in kept.iter().enumerate() {
        let run_end = kept
            .get(idx + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(section.len());
        let tags = collect_tags(&section[end..run_end]);
        match category {
            "broad" => result.broad = tags,
            "niche" => result.niche = tags,
            _ => result.trending = tags,
        }
    }
    result
}

// First `broad` tags, next `niche`, next `trending`; the remainder is
// dropped. The split sizes are a tunable heuristic, not a contract.
fn positional_slice(tags: &[String], split: HashtagSplit) -> ParsedHashtags {
    let b = split.broad.min(tags.len());
    let n = (split.broad + split.niche).min(tags.len());
    let t = (split.broad + split.niche + split.trending).min(tags.len());
    ParsedHashtags {
        broad: tags[..b].to_vec(),
        niche: tags[b..n].to_vec(),
        trending: tags[n..t].to_vec(),
    }
}

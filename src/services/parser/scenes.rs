use super::strategy::{self, LabeledPattern};
use crate::models::StoryboardScene;
use regex::Regex;
use tracing::debug;

const SECTION_HEADERS: &[LabeledPattern] = &[
    LabeledPattern { name: "ru-block-2", pattern: r"(?i)БЛОК\s*2[^\n]*" },
    LabeledPattern { name: "en-block-2", pattern: r"(?i)BLOCK\s*2[^\n]*" },
    LabeledPattern {
        name: "storyboard-header",
        pattern: r"(?i)(?:director['’]?s\s+)?storyboard|раскадровка",
    },
];

const SCENE_START: &str = "[SCENE_START]";
const SCENE_END: &str = "[SCENE_END]";

// Known field names inside a tagged scene chunk. TEXT maps to the `audio`
// output field.
const FIELD_NAMES: &str = "SCENE_NUMBER|TIMING|VISUAL|TEXT|SFX|AI_VIDEO_PROMPT";

const DEFAULT_FIELD: &str = "TBD";
const DEFAULT_SFX: &str = "—";

pub(crate) fn extract_scenes(content: &str) -> Vec<StoryboardScene> {
    let section = strategy::locate_section(content, SECTION_HEADERS).unwrap_or(content);

    let mut scenes = tagged_scenes(section);
    if scenes.is_empty() {
        scenes = table_scenes(section);
    }
    debug!(count = scenes.len(), "storyboard scenes extracted");
    scenes
}

// Primary format: [SCENE_START] ... [SCENE_END] chunks with labeled fields.
fn tagged_scenes(section: &str) -> Vec<StoryboardScene> {
    section
        .split(SCENE_START)
        .skip(1)
        .enumerate()
        .map(|(idx, chunk)| {
            let chunk = chunk.split(SCENE_END).next().unwrap_or(chunk);
            StoryboardScene {
                scene: field(chunk, "SCENE_NUMBER")
                    .and_then(|v| strategy::first_int(&v))
                    .unwrap_or(idx as u32 + 1),
                timing: field(chunk, "TIMING").unwrap_or_else(|| DEFAULT_FIELD.to_string()),
                visual: field(chunk, "VISUAL").unwrap_or_else(|| DEFAULT_FIELD.to_string()),
                audio: field(chunk, "TEXT").unwrap_or_else(|| DEFAULT_FIELD.to_string()),
                sfx: field(chunk, "SFX").unwrap_or_else(|| DEFAULT_SFX.to_string()),
                ai_prompt: field(chunk, "AI_VIDEO_PROMPT")
                    .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            }
        })
        .collect()
}

// Value runs from the label to the next known field name or the end of the
// chunk. The regex crate has no lookahead, so the terminator is consumed by
// a non-capturing alternative instead.
fn field(chunk: &str, name: &str) -> Option<String> {
    let pattern = format!(r"(?s){name}\s*:\s*(.*?)\s*(?:(?:{FIELD_NAMES})\s*:|\z)");
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(chunk)?.get(1)?.as_str();
    let value = strategy::strip_bracket_tags(value);
    if value.is_empty() { None } else { Some(value) }
}

// Fallback format: a markdown table, columns mapped positionally.
fn table_scenes(section: &str) -> Vec<StoryboardScene> {
    let rows: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .filter(|line| !is_separator_row(line))
        .collect();

    // Need a header row plus at least one data row.
    if rows.len() < 2 {
        return Vec::new();
    }

    rows.iter()
        .skip(1)
        .enumerate()
        .filter_map(|(idx, row)| parse_table_row(row, idx as u32 + 1))
        .collect()
}

fn is_separator_row(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn parse_table_row(row: &str, position: u32) -> Option<StoryboardScene> {
    let cells: Vec<&str> = row
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect();
    if cells.len() < 3 {
        return None;
    }

    let cell = |i: usize| -> Option<String> {
        cells
            .get(i)
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
    };

    // Wide rows carry an explicit timing column (and sfx when six or more
    // cells are present); narrow rows reuse the label cell as timing.
    let (timing, visual, audio, sfx, ai_prompt) = if cells.len() >= 6 {
        (cell(1), cell(2), cell(3), cell(4), cell(5))
    } else if cells.len() == 5 {
        (cell(1), cell(2), cell(3), None, cell(4))
    } else {
        (cell(0), cell(1), cell(2), None, cell(3))
    };

    Some(StoryboardScene {
        scene: strategy::first_int(cells[0]).unwrap_or(position),
        timing: timing.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        visual: visual.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        audio: audio.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        sfx: sfx.unwrap_or_else(|| DEFAULT_SFX.to_string()),
        ai_prompt: ai_prompt.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_chunks_populate_all_fields() {
        let content = "\
BLOCK 2: Director's Storyboard
[SCENE_START]
SCENE_NUMBER: 1
TIMING: 0-3s
VISUAL: close-up on a phone screen
TEXT: did you know banks charge you for this
SFX: notification ping
AI_VIDEO_PROMPT: macro shot of a glowing phone screen in the dark
[SCENE_END]
[SCENE_START]
SCENE_NUMBER: 2
TIMING: 3-8s
VISUAL: whip pan to the host
TEXT: here is what they never tell you
SFX: whoosh
AI_VIDEO_PROMPT: fast dolly toward a person at a desk
[SCENE_END]
";
        let scenes = extract_scenes(content);
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].scene, 1);
        assert_eq!(scenes[0].timing, "0-3s");
        assert_eq!(scenes[0].audio, "did you know banks charge you for this");
        assert_eq!(scenes[0].sfx, "notification ping");
        assert_eq!(scenes[1].visual, "whip pan to the host");
        assert_eq!(scenes[1].ai_prompt, "fast dolly toward a person at a desk");
    }

    #[test]
    fn missing_tagged_fields_fall_back_to_defaults() {
        let content = "[SCENE_START]\nVISUAL: hands typing\n[SCENE_END]";
        let scenes = extract_scenes(content);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].scene, 1); // sequential position
        assert_eq!(scenes[0].timing, "TBD");
        assert_eq!(scenes[0].visual, "hands typing");
        assert_eq!(scenes[0].sfx, "—");
    }

    #[test]
    fn source_scene_numbers_are_trusted_as_is() {
        let content = "\
[SCENE_START]
SCENE_NUMBER: 7
VISUAL: opening shot
[SCENE_END]
[SCENE_START]
SCENE_NUMBER: 3
VISUAL: second shot
[SCENE_END]
";
        let scenes = extract_scenes(content);
        assert_eq!(scenes[0].scene, 7);
        assert_eq!(scenes[1].scene, 3); // document order preserved
    }

    #[test]
    fn markdown_table_maps_wide_rows_positionally() {
        let content = "\
| Scene | Timing | Visual | Audio | SFX | AI Prompt |
|-------|--------|--------|-------|-----|-----------|
| 1 | 0-3s | drone shot over city | narrator opens with a question | wind | aerial city at dawn |
| 2 | 3-7s | cut to kitchen | host explains the trick | sizzle | warm kitchen, morning light |
";
        let scenes = extract_scenes(content);
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].scene, 1);
        assert_eq!(scenes[0].visual, "drone shot over city");
        assert_eq!(scenes[0].audio, "narrator opens with a question");
        assert_eq!(scenes[0].sfx, "wind");
        assert_eq!(scenes[1].ai_prompt, "warm kitchen, morning light");
    }

    #[test]
    fn narrow_table_rows_reuse_label_as_timing() {
        let content = "\
| Timing | Visual | Audio | Prompt |
|--------|--------|-------|--------|
| 0-5s | beach at sunset | voiceover intro | golden hour beach |
";
        let scenes = extract_scenes(content);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].timing, "0-5s");
        assert_eq!(scenes[0].visual, "beach at sunset");
        assert_eq!(scenes[0].audio, "voiceover intro");
        assert_eq!(scenes[0].ai_prompt, "golden hour beach");
        assert_eq!(scenes[0].sfx, "—");
    }

    #[test]
    fn tagged_format_wins_over_table() {
        let content = "\
[SCENE_START]
VISUAL: tagged wins
[SCENE_END]
| a | b | c | d |
|---|---|---|---|
| 1 | x | y | z |
";
        let scenes = extract_scenes(content);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].visual, "tagged wins");
    }
}

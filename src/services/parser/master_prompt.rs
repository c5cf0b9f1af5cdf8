use super::strategy::{self, LabeledPattern};
use crate::models::{MasterPrompt, VoiceSettings};
use regex::Regex;
use tracing::debug;

// These blocks are assumed to close the document, so every header takes
// everything to the end of input.
const SECTION_HEADERS: &[LabeledPattern] = &[
    LabeledPattern { name: "robot-copy-paste", pattern: r"🤖[^\n]*" },
    LabeledPattern { name: "ru-block-3", pattern: r"(?i)БЛОК\s*3[^\n]*" },
    LabeledPattern { name: "en-block-3", pattern: r"(?i)BLOCK\s*3[^\n]*" },
    LabeledPattern {
        name: "master-prompt-header",
        pattern: r"(?i)(?:master|мастер)[\s\-]?(?:prompt|промпт)[^\n]*",
    },
];

// Blocks shorter than this are noise, not a master prompt.
const MIN_BLOCK_LEN: usize = 50;
const MIN_IMAGE_PROMPT_LEN: usize = 10;

const DEFAULT_ROLE: &str = "You are a viral short-form video scriptwriter.";
const DEFAULT_CONTEXT: &str =
    "Produce production-ready assets for a short vertical video on the given topic.";

const DEFAULT_IMAGE_PROMPTS: [&str; 5] = [
    "Cinematic close-up of the main subject, shallow depth of field, vertical 9:16",
    "Dynamic mid-shot with dramatic side lighting, high contrast, vertical 9:16",
    "Overhead establishing shot setting the context of the topic, vertical 9:16",
    "Detail macro shot of a key object from the script, soft bokeh, vertical 9:16",
    "Final hero shot with bold text space at the top third, vertical 9:16",
];

pub(crate) fn extract_master_prompt(content: &str) -> Option<MasterPrompt> {
    let block = strategy::locate_trailing(content, SECTION_HEADERS)
        .map(str::to_string)
        .or_else(|| last_fenced_block(content))?;

    let cleaned = strip_fences(&block);
    if cleaned.chars().count() < MIN_BLOCK_LEN {
        debug!(len = cleaned.chars().count(), "master prompt block below floor, rejected");
        return None;
    }

    Some(MasterPrompt {
        role: labeled_line(&cleaned, "role|роль").unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        context: labeled_line(&cleaned, "context|контекст")
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
        image_prompts: image_prompts(&cleaned),
        voice_settings: voice_settings(&cleaned),
        full_text: cleaned,
    })
}

fn last_fenced_block(content: &str) -> Option<String> {
    let re = Regex::new(r"(?s)```[a-zA-Z]*\n?(.*?)```").ok()?;
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .last()
}

fn strip_fences(block: &str) -> String {
    block
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn labeled_line(block: &str, labels: &str) -> Option<String> {
    let pattern = format!(r"(?im)^\s*(?:\*\*)?\s*(?:{labels})\s*(?:\*\*)?\s*[:\-–—]\s*(.+)$");
    let re = Regex::new(&pattern).ok()?;
    let text = re.captures(block)?.get(1)?.as_str().trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

fn image_prompts(block: &str) -> Vec<String> {
    // "Image 1: ..." labels first, then a plain numbered quoted list.
    let labeled = collect_captures(block, r"(?im)^\s*(?:image|изображение)\s*\d+\s*[:\-–—]\s*(.+)$");
    let candidates = if labeled.is_empty() {
        collect_captures(block, r#"(?m)^\s*\d+[.)]\s*[«"“]([^«»"”\n]+)[»"”]"#)
    } else {
        labeled
    };

    let mut seen = Vec::new();
    for prompt in candidates {
        if prompt.chars().count() > MIN_IMAGE_PROMPT_LEN && !seen.contains(&prompt) {
            seen.push(prompt);
        }
    }
    if seen.is_empty() {
        seen = DEFAULT_IMAGE_PROMPTS.iter().map(|s| s.to_string()).collect();
    }
    seen
}

fn collect_captures(block: &str, pattern: &str) -> Vec<String> {
    let Some(re) = Regex::new(pattern).ok() else {
        return Vec::new();
    };
    re.captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

fn voice_settings(block: &str) -> VoiceSettings {
    let defaults = VoiceSettings::default();
    VoiceSettings {
        stability: labeled_int(block, r"(?i)stability\s*[:=\-–—]?\s*(\d{1,3})")
            .unwrap_or(defaults.stability),
        clarity: labeled_int(block, r"(?i)(?:clarity|similarity)\s*[:=\-–—]?\s*(\d{1,3})")
            .unwrap_or(defaults.clarity),
        style_exaggeration: labeled_int(
            block,
            r"(?i)style(?:[\s_]?exaggeration)?\s*[:=\-–—]?\s*(\d{1,3})",
        )
        .unwrap_or(defaults.style_exaggeration),
    }
}

fn labeled_int(block: &str, pattern: &str) -> Option<u8> {
    let re = Regex::new(pattern).ok()?;
    let value: u32 = re.captures(block)?.get(1)?.as_str().parse().ok()?;
    Some(value.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_header_takes_rest_of_document() {
        let content = "\
some hook content above

🤖 COPY-PASTE FOR AI AGENT
Role: senior video director for short vertical content
Context: 30-second video about home coffee brewing
Image 1: steaming espresso cup on a wooden counter, morning light
Image 2: slow pour over a glass carafe, macro shot
Stability: 40
Clarity: 80
Style: 20
";
        let mp = extract_master_prompt(content).unwrap();
        assert_eq!(mp.role, "senior video director for short vertical content");
        assert_eq!(mp.context, "30-second video about home coffee brewing");
        assert_eq!(mp.image_prompts.len(), 2);
        assert!(mp.image_prompts[0].starts_with("steaming espresso"));
        assert_eq!(mp.voice_settings.stability, 40);
        assert_eq!(mp.voice_settings.clarity, 80);
        assert_eq!(mp.voice_settings.style_exaggeration, 20);
        assert!(!mp.full_text.contains("```"));
    }

    #[test]
    fn falls_back_to_last_fenced_block() {
        let content = format!(
            "text\n```\nfirst block that is definitely long enough to pass the floor\n```\nmore\n```\n{}\n```\n",
            "the last fenced block wins and it is long enough to be accepted"
        );
        let mp = extract_master_prompt(&content).unwrap();
        assert!(mp.full_text.contains("the last fenced block wins"));
        assert!(!mp.full_text.contains("first block"));
        assert_eq!(mp.role, DEFAULT_ROLE);
        assert_eq!(mp.voice_settings, VoiceSettings::default());
    }

    #[test]
    fn short_blocks_are_rejected() {
        let content = "```\ntiny prompt\n```";
        assert!(extract_master_prompt(content).is_none());
    }

    #[test]
    fn duplicate_image_prompts_are_deduplicated() {
        let content = "\
MASTER PROMPT
Image 1: a very distinctive picture of a mountain lake
Image 2: a very distinctive picture of a mountain lake
Image 3: something else entirely, a city street at night
";
        let mp = extract_master_prompt(content).unwrap();
        assert_eq!(mp.image_prompts.len(), 2);
    }

    #[test]
    fn missing_labels_get_generic_defaults() {
        let content = format!("BLOCK 3\n{}", "unstructured prompt text ".repeat(5));
        let mp = extract_master_prompt(&content).unwrap();
        assert_eq!(mp.role, DEFAULT_ROLE);
        assert_eq!(mp.context, DEFAULT_CONTEXT);
        assert_eq!(mp.image_prompts.len(), DEFAULT_IMAGE_PROMPTS.len());
    }
}

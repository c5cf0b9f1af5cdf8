use crate::models::{HookType, ViralHook};
use regex::Regex;
use tracing::debug;

// Fixed persuasion taxonomy. At most one hook per emoji, first match in the
// document wins.
const TAXONOMY: &[(&str, HookType, &str)] = &[
    ("😱", HookType::Fear, "Fear Hook"),
    ("👀", HookType::Curiosity, "Curiosity Hook"),
    ("💎", HookType::Value, "Value Hook"),
    ("🔥", HookType::Controversy, "Controversy Hook"),
    ("⏳", HookType::Urgency, "Urgency Hook"),
];

pub(crate) fn extract_viral_hooks(content: &str) -> Vec<ViralHook> {
    let quoted = Regex::new(r#"[«"“]([^«»"”\n]+)[»"”]"#).ok();
    let bracket_prefix = Regex::new(r"^\s*\[[^\]]*\]\s*").ok();

    let mut hooks = Vec::new();
    for (emoji, hook_type, title) in TAXONOMY {
        for line in content.lines() {
            let Some(pos) = line.find(emoji) else { continue };
            let rest = &line[pos + emoji.len()..];

            // Labeled quoted text first, then the raw rest of the line.
            let text = quoted
                .as_ref()
                .and_then(|re| re.captures(rest))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_else(|| clean_rest(rest, bracket_prefix.as_ref()));

            if text.is_empty() {
                continue;
            }
            hooks.push(ViralHook {
                hook_type: *hook_type,
                emoji: emoji.to_string(),
                title: title.to_string(),
                text,
            });
            break;
        }
    }
    debug!(count = hooks.len(), "viral hooks extracted");
    hooks
}

fn clean_rest(rest: &str, bracket_prefix: Option<&Regex>) -> String {
    let stripped = match bracket_prefix {
        Some(re) => re.replace(rest, "").to_string(),
        None => rest.to_string(),
    };
    stripped
        .trim()
        .trim_matches(['"', '«', '»', '“', '”', ':', '-', '–', '—', '*', ' '])
        .trim()
        .to_string()
}

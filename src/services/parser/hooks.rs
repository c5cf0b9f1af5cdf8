use super::RetentionSampler;
use super::strategy::{self, LabeledPattern};
use crate::models::{HookType, HookVariant};
use regex::Regex;
use tracing::debug;

// Bilingual headers for the hook block. First match wins; when nothing
// matches, the whole input is searched in degraded mode.
const SECTION_HEADERS: &[LabeledPattern] = &[
    LabeledPattern { name: "ru-block-1", pattern: r"(?i)БЛОК\s*1[^\n]*" },
    LabeledPattern { name: "en-block-1", pattern: r"(?i)BLOCK\s*1[^\n]*" },
    LabeledPattern { name: "hooks-header", pattern: r"(?im)^#{0,3}\s*(?:хуки|крючки|hooks?)\b[^\n]*" },
];

// How far past a slot label the retention/mechanism lookups may scan.
const SLOT_WINDOW: usize = 400;
const MIN_HOOK_LEN: usize = 5;
const MIN_FALLBACK_QUOTE_LEN: usize = 15;

struct Slot {
    // Latin letter plus its Cyrillic homoglyphs/equivalents
    letter_class: &'static str,
    hook_type: HookType,
    title: &'static str,
    default_mechanism: &'static str,
}

const SLOTS: [Slot; 3] = [
    Slot {
        letter_class: "[AА]",
        hook_type: HookType::Aggressive,
        title: "Aggressive Hook",
        default_mechanism: "Direct confrontation forces the viewer to pick a side in the first second.",
    },
    Slot {
        letter_class: "[BВБ]",
        hook_type: HookType::Intriguing,
        title: "Intriguing Hook",
        default_mechanism: "An open loop the brain needs to close keeps the viewer watching.",
    },
    Slot {
        letter_class: "[CС]",
        hook_type: HookType::Visual,
        title: "Visual Hook",
        default_mechanism: "A concrete image anchors the promise before the first word lands.",
    },
];

// Label+quote patterns per slot, ordered. `{L}` is replaced by the slot's
// letter class before compilation.
const SLOT_PATTERNS: &[(&str, &str)] = &[
    // **Вариант A:** «text» / **A)** text
    // The separator after the letter is mandatory, otherwise the letter
    // class would hit the «В» inside «**Вариант A:**» for slot B.
    ("bold-label", r#"(?m)^\s*\*\*[^\n*]*?{L}\s*[):.][^\n*]*?\*\*\s*[:\-–—]?\s*[«"“]?([^«»"”\n]{5,})"#),
    // Вариант A: — «text» / Option B) - text
    ("dash-label", r#"(?m)^\s*(?:Вариант|Хук|Variant|Option|Hook)?\s*{L}\s*[):.]\s*[-–—]?\s*[«"“]?([^«»"”\n]{5,})"#),
    // A - «text»
    ("quote-label", r#"(?m)^\s*{L}\s*[-–—]\s*[«"“]([^«»"”\n]{5,})[»"”]"#),
];

pub(crate) fn extract_hooks(content: &str, sampler: &dyn RetentionSampler) -> Vec<HookVariant> {
    let section = strategy::locate_section(content, SECTION_HEADERS).unwrap_or(content);

    let mut hooks = Vec::new();
    for slot in &SLOTS {
        if let Some((text, label_end)) = match_slot(section, slot) {
            let window = strategy::window(section, label_end, SLOT_WINDOW);
            hooks.push(HookVariant {
                hook_type: slot.hook_type,
                title: slot.title.to_string(),
                hook_text: text,
                retention_forecast: find_retention(window).unwrap_or_else(|| sampler.retention()),
                mechanism: find_mechanism(window)
                    .unwrap_or_else(|| slot.default_mechanism.to_string()),
            });
        }
    }

    // All three slot cascades missed: grab any quoted string long enough to
    // be a hook and fill slots A/B/C in order.
    if hooks.is_empty() {
        hooks = quoted_fallback(section, sampler);
    }

    debug!(count = hooks.len(), "hook variants extracted");
    hooks
}

fn match_slot(section: &str, slot: &Slot) -> Option<(String, usize)> {
    let patterns: Vec<(&str, String)> = SLOT_PATTERNS
        .iter()
        .map(|(name, template)| (*name, template.replace("{L}", slot.letter_class)))
        .collect();
    let (raw, label_end) = strategy::first_capture(section, &patterns)?;
    let text = clean_hook_text(&raw);
    if text.chars().count() < MIN_HOOK_LEN {
        return None;
    }
    tracing::trace!(slot = slot.title, "hook slot matched");
    Some((text, label_end))
}

fn clean_hook_text(raw: &str) -> String {
    raw.trim()
        .trim_matches(['"', '«', '»', '“', '”', '*', ' '])
        .to_string()
}

// "NN%" anywhere in the slot window.
fn find_retention(window: &str) -> Option<u8> {
    let re = Regex::new(r"(\d{1,3})\s*%").ok()?;
    let value: u32 = re.captures(window)?.get(1)?.as_str().parse().ok()?;
    Some(value.min(100) as u8)
}

fn find_mechanism(window: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)(?:механика|механизм|почему\s+(?:это\s+)?работает|mechanism|why\s+it\s+works)\s*[:\-–—]?\s*([^\n]{3,})",
    )
    .ok()?;
    let text = re.captures(window)?.get(1)?.as_str();
    Some(clean_hook_text(text))
}

fn quoted_fallback(section: &str, sampler: &dyn RetentionSampler) -> Vec<HookVariant> {
    let Some(re) = Regex::new(r#"[«"“]([^«»"”\n]+)[»"”]"#).ok() else {
        return Vec::new();
    };
    re.captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| text.chars().count() >= MIN_FALLBACK_QUOTE_LEN)
        .take(SLOTS.len())
        .enumerate()
        .map(|(i, text)| HookVariant {
            hook_type: SLOTS[i].hook_type,
            title: SLOTS[i].title.to_string(),
            hook_text: text,
            retention_forecast: sampler.retention(),
            mechanism: SLOTS[i].default_mechanism.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parser::FixedSampler;

    const SAMPLER: FixedSampler = FixedSampler(80);

    #[test]
    fn extracts_three_labeled_slots() {
        let content = "\
БЛОК 1: Хуки

**Вариант A:** «Ты всё ещё хранишь деньги в банке?»
Удержание: 88%
Механика: прямой вызов зрителю

**Вариант B:** «Никто не расскажет тебе этот секрет»
Удержание: 92%

**Вариант C:** «Представь: экран телефона в 3 часа ночи»
";
        let hooks = extract_hooks(content, &SAMPLER);
        assert_eq!(hooks.len(), 3);
        assert_eq!(hooks[0].hook_type, HookType::Aggressive);
        assert_eq!(hooks[0].retention_forecast, 88);
        assert_eq!(hooks[0].mechanism, "прямой вызов зрителю");
        assert_eq!(hooks[1].hook_type, HookType::Intriguing);
        assert_eq!(hooks[1].retention_forecast, 92);
        // no mechanism label in slot C window -> per-type default
        assert_eq!(hooks[2].mechanism, SLOTS[2].default_mechanism);
        assert_eq!(hooks[2].retention_forecast, 80);
    }

    #[test]
    fn english_labels_work_without_section_header() {
        let content = "Option A: \"Stop scrolling, this changes everything\"\nRetention: 85%";
        let hooks = extract_hooks(content, &SAMPLER);
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].hook_text, "Stop scrolling, this changes everything");
        assert_eq!(hooks[0].retention_forecast, 85);
    }

    #[test]
    fn quoted_fallback_fills_slots_in_order() {
        let content = "\
BLOCK 1
Some prose with \"this is a long quoted candidate line\" inside,
then \"short\" which is ignored, and
\"another sufficiently long quoted line here\" at the end.
";
        let hooks = extract_hooks(content, &SAMPLER);
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].hook_type, HookType::Aggressive);
        assert_eq!(hooks[0].hook_text, "this is a long quoted candidate line");
        assert_eq!(hooks[1].hook_type, HookType::Intriguing);
    }

    #[test]
    fn no_candidates_yields_empty() {
        assert!(extract_hooks("just a plain sentence", &SAMPLER).is_empty());
    }
}

//! Best-effort extraction of a structured production package from a
//! free-form, bilingual (Russian/English) AI completion.
//!
//! Five independent sub-extractors scan the same input; whatever matches is
//! returned, whatever misses degrades to documented defaults. Parsing never
//! fails: the only failure mode is `has_structured_data == false`.

mod fallback;
mod hashtags;
mod hooks;
mod master_prompt;
mod scenes;
mod strategy;
mod viral;

use crate::models::ParsedResult;
use std::sync::Arc;
use tracing::debug;

/// Source for the retention-forecast placeholder used when a hook carries no
/// explicit "NN%" figure. Injectable so tests can pin it.
pub trait RetentionSampler: Send + Sync {
    /// A percentage in `[75, 95)`.
    fn retention(&self) -> u8;
}

/// Production sampler, seeded from the clock on every draw.
pub struct SystemSampler;

impl RetentionSampler for SystemSampler {
    fn retention(&self) -> u8 {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        75 + (nanos % 20) as u8
    }
}

/// Fixed sampler for deterministic tests.
pub struct FixedSampler(pub u8);

impl RetentionSampler for FixedSampler {
    fn retention(&self) -> u8 {
        self.0
    }
}

/// Whether scenes keep their document order or are sorted by the scene
/// number declared in the source. Sources sometimes mislabel numbers, so
/// document order is the default and the declared numbers are trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneOrder {
    #[default]
    Document,
    ByNumber,
}

/// Bucket sizes for the positional hashtag slice used when no category
/// labels exist. A heuristic, not a contract.
#[derive(Debug, Clone, Copy)]
pub struct HashtagSplit {
    pub broad: usize,
    pub niche: usize,
    pub trending: usize,
}

impl Default for HashtagSplit {
    fn default() -> Self {
        HashtagSplit { broad: 5, niche: 7, trending: 5 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    pub scene_order: SceneOrder,
    pub hashtag_split: HashtagSplit,
}

// Inputs longer than this with zero structural matches get the synthetic
// demo package instead of an empty result.
const SYNTHETIC_FLOOR: usize = 100;

pub struct ResponseParser {
    config: ParserConfig,
    sampler: Arc<dyn RetentionSampler>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        ResponseParser {
            config: ParserConfig::default(),
            sampler: Arc::new(SystemSampler),
        }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        ResponseParser { config, sampler: Arc::new(SystemSampler) }
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn RetentionSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Parse one completion into a structured production package.
    ///
    /// Never panics and never errors; see the module docs for the degrade
    /// rules.
    pub fn parse(&self, content: &str) -> ParsedResult {
        if content.trim().is_empty() {
            return ParsedResult {
                raw_content: content.to_string(),
                ..ParsedResult::default()
            };
        }

        let hooks = hooks::extract_hooks(content, self.sampler.as_ref());
        let viral_hooks = viral::extract_viral_hooks(content);
        let hashtags = hashtags::extract_hashtags(content, self.config.hashtag_split);
        let mut scenes = scenes::extract_scenes(content);
        let master_prompt = master_prompt::extract_master_prompt(content);

        if self.config.scene_order == SceneOrder::ByNumber {
            // Stable sort: equal declared numbers keep document order.
            scenes.sort_by_key(|s| s.scene);
        }

        let has_structured_data = !hooks.is_empty()
            || !viral_hooks.is_empty()
            || hashtags.is_some()
            || !scenes.is_empty()
            || master_prompt.is_some();

        if !has_structured_data && content.chars().count() > SYNTHETIC_FLOOR {
            debug!("no structured data in substantial response, using synthetic fallback");
            let demo = fallback::synthesize(content);
            return ParsedResult {
                hooks: demo.hooks,
                scenes: demo.scenes,
                master_prompt: Some(demo.master_prompt),
                raw_content: content.to_string(),
                has_structured_data: true,
                ..ParsedResult::default()
            };
        }

        debug!(
            hooks = hooks.len(),
            viral = viral_hooks.len(),
            scenes = scenes.len(),
            hashtags = hashtags.is_some(),
            master_prompt = master_prompt.is_some(),
            has_structured_data,
            "response parsed"
        );

        ParsedResult {
            hooks,
            viral_hooks,
            hashtags,
            scenes,
            master_prompt,
            raw_content: content.to_string(),
            has_structured_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HookType;

    fn pinned() -> ResponseParser {
        ResponseParser::new().with_sampler(Arc::new(FixedSampler(80)))
    }

    #[test]
    fn empty_input_is_a_negative_result() {
        let result = pinned().parse("");
        assert!(!result.has_structured_data);
        assert!(result.hooks.is_empty());
        assert!(result.viral_hooks.is_empty());
        assert!(result.scenes.is_empty());
        assert!(result.hashtags.is_none());
        assert!(result.master_prompt.is_none());
    }

    #[test]
    fn short_unstructured_input_does_not_synthesize() {
        let result = pinned().parse("too short to bother");
        assert!(!result.has_structured_data);
        assert!(result.hooks.is_empty());
    }

    #[test]
    fn long_unstructured_input_synthesizes() {
        let content = "just plain prose about bitcoin with no structure at all. ".repeat(4);
        assert!(content.chars().count() > SYNTHETIC_FLOOR);
        let result = pinned().parse(&content);
        assert!(result.has_structured_data);
        assert_eq!(result.hooks.len(), 3);
        assert_eq!(result.scenes.len(), 5);
        assert!(result.master_prompt.is_some());
        assert!(result.viral_hooks.is_empty());
        assert!(result.hashtags.is_none());
    }

    #[test]
    fn partial_matches_do_not_trigger_synthesis() {
        let content = format!(
            "😱 one viral hook line only\n{}",
            "filler prose with no other structure whatsoever. ".repeat(5)
        );
        let result = pinned().parse(&content);
        assert!(result.has_structured_data);
        assert_eq!(result.viral_hooks.len(), 1);
        assert!(result.hooks.is_empty());
        assert!(result.master_prompt.is_none());
    }

    #[test]
    fn scene_sorting_is_opt_in() {
        let content = "\
[SCENE_START]
SCENE_NUMBER: 5
VISUAL: late scene listed first
[SCENE_END]
[SCENE_START]
SCENE_NUMBER: 2
VISUAL: early scene listed second
[SCENE_END]
";
        let document = pinned().parse(content);
        assert_eq!(document.scenes[0].scene, 5);

        let sorted = ResponseParser::with_config(ParserConfig {
            scene_order: SceneOrder::ByNumber,
            ..ParserConfig::default()
        })
        .parse(content);
        assert_eq!(sorted.scenes[0].scene, 2);
        assert_eq!(sorted.scenes[1].scene, 5);
    }

    #[test]
    fn raw_content_is_always_echoed_back() {
        let result = pinned().parse("   ");
        assert_eq!(result.raw_content, "   ");
    }

    #[test]
    fn pinned_parser_is_idempotent() {
        let content = "\
BLOCK 1
**Variant A:** \"a hook that is long enough\"
😱 a fear line
#alpha #beta
";
        let parser = pinned();
        assert_eq!(parser.parse(content), parser.parse(content));
    }

    #[test]
    fn hook_types_follow_slot_order() {
        let content = "\
**Variant A:** \"first hook text here\"
**Variant B:** \"second hook text here\"
";
        let result = pinned().parse(content);
        assert_eq!(result.hooks[0].hook_type, HookType::Aggressive);
        assert_eq!(result.hooks[1].hook_type, HookType::Intriguing);
    }
}

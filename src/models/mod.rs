use serde::{Deserialize, Serialize};

/// Semantic flavor of a hook line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookType {
    Aggressive,
    Intriguing,
    Visual,
    Fear,
    Curiosity,
    Controversy,
    Value,
    Urgency,
}

/// One of the A/B/C headline-style hook candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookVariant {
    #[serde(rename = "type")]
    pub hook_type: HookType,
    pub title: String,
    pub hook_text: String,
    /// Heuristic 0-100 percentage, a placeholder rather than a measurement.
    pub retention_forecast: u8,
    pub mechanism: String,
}

/// An emoji-tagged one-liner keyed to the fixed persuasion taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralHook {
    #[serde(rename = "type")]
    pub hook_type: HookType,
    pub emoji: String,
    pub title: String,
    pub text: String,
}

/// Categorized bare tag strings (no leading `#`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHashtags {
    pub broad: Vec<String>,
    pub niche: Vec<String>,
    pub trending: Vec<String>,
}

impl ParsedHashtags {
    pub fn is_empty(&self) -> bool {
        self.broad.is_empty() && self.niche.is_empty() && self.trending.is_empty()
    }
}

/// One row of the shot-by-shot production plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardScene {
    pub scene: u32,
    pub timing: String,
    pub visual: String,
    pub audio: String,
    pub sfx: String,
    pub ai_prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub stability: u8,
    pub clarity: u8,
    pub style_exaggeration: u8,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        VoiceSettings {
            stability: 35,
            clarity: 70,
            style_exaggeration: 25,
        }
    }
}

/// Trailing copy-paste block meant for a third-party AI tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterPrompt {
    pub full_text: String,
    pub role: String,
    pub context: String,
    pub image_prompts: Vec<String>,
    pub voice_settings: VoiceSettings,
}

/// Everything extracted from a single AI completion.
///
/// `has_structured_data` is true iff any of the five sub-extractions yielded
/// something; consumers are expected to render raw text when it is false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub hooks: Vec<HookVariant>,
    pub viral_hooks: Vec<ViralHook>,
    pub hashtags: Option<ParsedHashtags>,
    pub scenes: Vec<StoryboardScene>,
    pub master_prompt: Option<MasterPrompt>,
    pub raw_content: String,
    pub has_structured_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub generation_id: String,
    pub result: ParsedResult,
}

pub mod models;
pub mod services;

pub use models::{
    HookType, HookVariant, MasterPrompt, ParsedHashtags, ParsedResult, StoryboardScene, ViralHook,
    VoiceSettings,
};
pub use services::parser::{
    FixedSampler, HashtagSplit, ParserConfig, ResponseParser, RetentionSampler, SceneOrder,
    SystemSampler,
};

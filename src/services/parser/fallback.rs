use crate::models::{HookType, HookVariant, MasterPrompt, StoryboardScene, VoiceSettings};
use tracing::debug;

/// Topic bucket for the canned demo package. Classification is a plain
/// case-insensitive substring lookup, English and Russian keywords alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TopicCategory {
    Crypto,
    Food,
    Fitness,
    Generic,
}

const CRYPTO_KEYWORDS: &[&str] = &[
    "crypto", "bitcoin", "btc", "ethereum", "blockchain", "trading", "крипт", "битко", "блокчейн",
    "трейд", "токен",
];
const FOOD_KEYWORDS: &[&str] = &[
    "food", "recipe", "cook", "restaurant", "еда", "рецепт", "готов", "кухн", "ресторан",
];
const FITNESS_KEYWORDS: &[&str] = &[
    "fitness", "workout", "gym", "muscle", "фитнес", "трениров", "спортзал", "мышц", "зал",
];

pub(crate) fn classify(content: &str) -> TopicCategory {
    let lower = content.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));
    if hit(CRYPTO_KEYWORDS) {
        TopicCategory::Crypto
    } else if hit(FOOD_KEYWORDS) {
        TopicCategory::Food
    } else if hit(FITNESS_KEYWORDS) {
        TopicCategory::Fitness
    } else {
        TopicCategory::Generic
    }
}

pub(crate) struct DemoPackage {
    pub hooks: Vec<HookVariant>,
    pub scenes: Vec<StoryboardScene>,
    pub master_prompt: MasterPrompt,
}

/// Hand-authored demo content so substantial but unstructured responses
/// still render something. Deterministic lookup, no randomness.
pub(crate) fn synthesize(content: &str) -> DemoPackage {
    let category = classify(content);
    debug!(?category, "synthesizing demo package");
    let t = template(category);

    let hooks = t
        .hooks
        .iter()
        .map(|&(hook_type, title, text, retention, mechanism)| HookVariant {
            hook_type,
            title: title.to_string(),
            hook_text: text.to_string(),
            retention_forecast: retention,
            mechanism: mechanism.to_string(),
        })
        .collect();

    let scenes = t
        .scenes
        .iter()
        .enumerate()
        .map(|(i, &(timing, visual, audio, sfx, ai_prompt))| StoryboardScene {
            scene: i as u32 + 1,
            timing: timing.to_string(),
            visual: visual.to_string(),
            audio: audio.to_string(),
            sfx: sfx.to_string(),
            ai_prompt: ai_prompt.to_string(),
        })
        .collect();

    let image_prompts: Vec<String> = t.image_prompts.iter().map(|s| s.to_string()).collect();
    let full_text = format!(
        "Role: {}\nContext: {}\n\nImage prompts:\n{}",
        t.role,
        t.context,
        image_prompts
            .iter()
            .enumerate()
            .map(|(i, p)| format!("Image {}: {}", i + 1, p))
            .collect::<Vec<_>>()
            .join("\n"),
    );

    DemoPackage {
        hooks,
        scenes,
        master_prompt: MasterPrompt {
            full_text,
            role: t.role.to_string(),
            context: t.context.to_string(),
            image_prompts,
            voice_settings: VoiceSettings::default(),
        },
    }
}

struct Template {
    hooks: [(HookType, &'static str, &'static str, u8, &'static str); 3],
    scenes: [(&'static str, &'static str, &'static str, &'static str, &'static str); 5],
    role: &'static str,
    context: &'static str,
    image_prompts: [&'static str; 5],
}

fn template(category: TopicCategory) -> Template {
    match category {
        TopicCategory::Crypto => Template {
            hooks: [
                (
                    HookType::Aggressive,
                    "Aggressive Hook",
                    "Your bank is quietly eating your savings while you watch this",
                    87,
                    "Names an enemy and a loss that is happening right now.",
                ),
                (
                    HookType::Intriguing,
                    "Intriguing Hook",
                    "The one chart crypto whales check before every single trade",
                    83,
                    "Promises insider knowledge behind a specific, concrete object.",
                ),
                (
                    HookType::Visual,
                    "Visual Hook",
                    "Watch what happens to $100 left on an exchange for one year",
                    90,
                    "Opens on a measurable transformation the viewer can see.",
                ),
            ],
            scenes: [
                (
                    "0-3s",
                    "Extreme close-up of a price chart crashing, red candles",
                    "Your bank is quietly eating your savings",
                    "deep bass hit",
                    "macro shot of a trading chart with red candles, dark room, screen glow",
                ),
                (
                    "3-8s",
                    "Cut to host holding a phone with a wallet app open",
                    "Here is where that money actually goes",
                    "paper shuffle",
                    "person holding smartphone with crypto wallet app, neutral background",
                ),
                (
                    "8-15s",
                    "Animated diagram of fees stacking up month over month",
                    "Fees, spreads and inflation stack against you",
                    "soft ticking",
                    "clean infographic animation of stacked coins shrinking over time",
                ),
                (
                    "15-22s",
                    "Split screen: savings account vs staked stablecoins",
                    "Compare the same $1000 after twelve months",
                    "whoosh",
                    "split screen comparison of two growing coin stacks, flat design",
                ),
                (
                    "22-30s",
                    "Host to camera, confident, pointing at subscribe button",
                    "Follow for the full playbook, link in bio",
                    "rising synth",
                    "confident presenter pointing at camera, studio lighting, vertical framing",
                ),
            ],
            role: "You are a crypto-literate short-form video producer.",
            context: "A 30-second vertical video explaining a personal-finance angle on crypto to a skeptical audience.",
            image_prompts: [
                "Macro shot of a trading chart with red candles in a dark room",
                "Smartphone with a crypto wallet app held in one hand, soft light",
                "Flat-design infographic of shrinking coin stacks over a calendar",
                "Split-screen comparison of two coin stacks, clean studio backdrop",
                "Confident presenter pointing at camera, vertical 9:16 studio shot",
            ],
        },
        TopicCategory::Food => Template {
            hooks: [
                (
                    HookType::Aggressive,
                    "Aggressive Hook",
                    "You have been ruining this dish your whole life",
                    85,
                    "Accuses the viewer of a mistake they can fix in one video.",
                ),
                (
                    HookType::Intriguing,
                    "Intriguing Hook",
                    "Restaurants pay thousands to keep this trick off camera",
                    82,
                    "Frames a cheap technique as guarded professional knowledge.",
                ),
                (
                    HookType::Visual,
                    "Visual Hook",
                    "This is what 30 seconds of patience does to butter",
                    91,
                    "Leads with a transformation shot that rewards watching.",
                ),
            ],
            scenes: [
                (
                    "0-3s",
                    "Overhead shot of the finished dish, steam rising",
                    "You have been ruining this your whole life",
                    "sizzle",
                    "overhead food photography, steam rising from a rustic plate",
                ),
                (
                    "3-8s",
                    "Hands laying out the three ingredients on a counter",
                    "Three ingredients, one rule everyone breaks",
                    "chopping",
                    "flat lay of three fresh ingredients on a wooden counter, daylight",
                ),
                (
                    "8-15s",
                    "Close-up of the key technique in slow motion",
                    "Do this part slower than feels natural",
                    "butter foaming",
                    "slow-motion close-up of butter foaming in a steel pan",
                ),
                (
                    "15-22s",
                    "Side-by-side of the wrong way and the right way",
                    "Left is what most people do, right is the fix",
                    "gentle pop",
                    "side-by-side comparison of two plated versions of the same dish",
                ),
                (
                    "22-30s",
                    "First bite reaction, then plate pushed toward camera",
                    "Save this before you cook tonight",
                    "soft chime",
                    "close-up of a fork lifting a perfect bite toward the camera",
                ),
            ],
            role: "You are a food content creator who teaches technique fast.",
            context: "A 30-second vertical recipe video built around one fixable mistake.",
            image_prompts: [
                "Overhead shot of a rustic plated dish with steam, natural light",
                "Flat lay of three fresh ingredients on a worn wooden counter",
                "Slow-motion butter foaming in a steel pan, macro detail",
                "Side-by-side comparison of two plated versions of one dish",
                "Fork lifting a perfect bite toward camera, shallow focus",
            ],
        },
        TopicCategory::Fitness => Template {
            hooks: [
                (
                    HookType::Aggressive,
                    "Aggressive Hook",
                    "Your warm-up is the reason you are still not growing",
                    86,
                    "Attacks a habit the viewer believed was helping them.",
                ),
                (
                    HookType::Intriguing,
                    "Intriguing Hook",
                    "The 40% rule lifters discover five years too late",
                    84,
                    "A numbered rule implies a concrete, learnable secret.",
                ),
                (
                    HookType::Visual,
                    "Visual Hook",
                    "Same exercise, two grips, completely different muscle",
                    89,
                    "A visible A/B comparison makes the payoff immediate.",
                ),
            ],
            scenes: [
                (
                    "0-3s",
                    "Mid-set shot in the gym, bar moving slow",
                    "Your warm-up is why you are not growing",
                    "plates clinking",
                    "athlete mid-lift in a gym, dramatic side lighting, vertical",
                ),
                (
                    "3-8s",
                    "Coach stops the set, points at the bar path",
                    "Look at the bar path, not the weight",
                    "record scratch",
                    "coach gesturing at a barbell path overlay, gym background",
                ),
                (
                    "8-15s",
                    "Demonstration of the corrected movement, slow tempo",
                    "Three-second negatives, every rep",
                    "controlled breathing",
                    "slow controlled repetition demonstration, muscle detail visible",
                ),
                (
                    "15-22s",
                    "Split screen: old form vs corrected form",
                    "Same weight, double the stimulus",
                    "whoosh",
                    "split-screen form comparison of the same exercise, clean gym",
                ),
                (
                    "22-30s",
                    "Athlete racks the bar, talks straight to camera",
                    "Try it today and follow for the full program",
                    "rising beat",
                    "athlete talking to camera after a set, towel on shoulder",
                ),
            ],
            role: "You are a strength coach making evidence-based short videos.",
            context: "A 30-second vertical video correcting one common training mistake.",
            image_prompts: [
                "Athlete mid-lift with dramatic side lighting, vertical framing",
                "Barbell path overlay diagram on a gym scene",
                "Slow controlled repetition close-up, visible muscle detail",
                "Split-screen form comparison of one exercise, clean gym",
                "Athlete addressing camera post-set, authentic gym setting",
            ],
        },
        TopicCategory::Generic => Template {
            hooks: [
                (
                    HookType::Aggressive,
                    "Aggressive Hook",
                    "Everything you were told about this topic is outdated",
                    84,
                    "Invalidates prior knowledge to force a re-evaluation.",
                ),
                (
                    HookType::Intriguing,
                    "Intriguing Hook",
                    "Nobody talks about the second step, and it is the one that matters",
                    81,
                    "Implies a hidden gap in what the viewer already knows.",
                ),
                (
                    HookType::Visual,
                    "Visual Hook",
                    "Watch the before and after, then decide for yourself",
                    88,
                    "A visible transformation carries the promise without words.",
                ),
            ],
            scenes: [
                (
                    "0-3s",
                    "Bold text overlay over a fast push-in shot",
                    "Everything you were told about this is outdated",
                    "impact hit",
                    "fast push-in on a bold statement card, high contrast, vertical",
                ),
                (
                    "3-8s",
                    "Host lays out the common belief in one sentence",
                    "Here is what everyone assumes",
                    "page turn",
                    "presenter in front of a clean backdrop stating a premise",
                ),
                (
                    "8-15s",
                    "Cut to evidence: screen recording or demonstration",
                    "And here is what actually happens",
                    "keyboard clicks",
                    "over-the-shoulder demonstration shot, screen glow, detail focus",
                ),
                (
                    "15-22s",
                    "Three quick supporting examples, rapid cuts",
                    "It holds up across all three cases",
                    "triple whoosh",
                    "rapid montage of three related example shots, consistent grade",
                ),
                (
                    "22-30s",
                    "Host summary with a clear call to action",
                    "Save this and try it this week",
                    "soft outro chord",
                    "presenter delivering a closing line, warm light, vertical 9:16",
                ),
            ],
            role: "You are a short-form video scriptwriter for educational content.",
            context: "A 30-second vertical video challenging one common assumption on the topic.",
            image_prompts: [
                "Bold statement card with high-contrast typography, vertical",
                "Presenter in front of a clean backdrop, soft key light",
                "Over-the-shoulder demonstration shot with screen glow",
                "Montage frame of three related examples, consistent color grade",
                "Presenter closing shot with warm lighting, vertical 9:16",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_classification_is_case_insensitive_and_bilingual() {
        assert_eq!(classify("All about BITCOIN today"), TopicCategory::Crypto);
        assert_eq!(classify("лучший рецепт завтрака"), TopicCategory::Food);
        assert_eq!(classify("leg day workout plan"), TopicCategory::Fitness);
        assert_eq!(classify("how to study better"), TopicCategory::Generic);
    }

    #[test]
    fn crypto_wins_over_later_buckets() {
        assert_eq!(
            classify("bitcoin recipes for gym lovers"),
            TopicCategory::Crypto
        );
    }

    #[test]
    fn package_shape_is_fixed() {
        let pkg = synthesize("something about blockchain staking");
        assert_eq!(pkg.hooks.len(), 3);
        assert_eq!(pkg.scenes.len(), 5);
        assert_eq!(pkg.scenes[0].scene, 1);
        assert_eq!(pkg.scenes[4].scene, 5);
        assert_eq!(pkg.master_prompt.image_prompts.len(), 5);
        assert_eq!(pkg.master_prompt.voice_settings, VoiceSettings::default());
    }

    #[test]
    fn synthesis_is_deterministic() {
        let a = synthesize("bitcoin");
        let b = synthesize("bitcoin");
        assert_eq!(a.hooks, b.hooks);
        assert_eq!(a.scenes, b.scenes);
        assert_eq!(a.master_prompt, b.master_prompt);
    }
}

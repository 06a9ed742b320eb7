use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static VOICE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid voice id pattern"));

/// A selectable voice offered to clients
#[derive(Debug, Clone, Serialize)]
pub struct VoiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const VOICE_OPTIONS: &[VoiceOption] = &[
    VoiceOption {
        id: "Pw7NjARk1Tw61eca5OiP",
        name: "Oswald",
        description: "A friendly male voice that speaks clearly",
    },
    VoiceOption {
        id: "ThT5KcBeYPX3keUQqHPh",
        name: "Dorothy",
        description: "A warm female voice that speaks gently",
    },
];

/// Voice ids end up as a path segment of the provider URL, so they must not
/// contain separators or anything that needs escaping.
pub fn is_valid_voice_id(voice_id: &str) -> bool {
    VOICE_ID_PATTERN.is_match(voice_id)
}

pub fn find_voice(voice_id: &str) -> Option<&'static VoiceOption> {
    VOICE_OPTIONS.iter().find(|voice| voice.id == voice_id)
}

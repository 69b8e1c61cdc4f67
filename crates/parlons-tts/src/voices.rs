//! Recommended voices per role.

use parlons_core::VoiceRole;

/// A voice known to work well for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedVoice {
    pub voice_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const FRENCH: &[RecommendedVoice] = &[
    RecommendedVoice {
        voice_id: "EXAVITQu4vr4xnSDxMaL",
        name: "Sarah",
        description: "Female, clear",
    },
    RecommendedVoice {
        voice_id: "JBFqnCBsd6RMkjVDRZzb",
        name: "George",
        description: "Male, warm",
    },
];

const NATIVE: &[RecommendedVoice] = &[RecommendedVoice {
    voice_id: "XB0fDUnXU5powFXDhCwa",
    name: "Charlotte",
    description: "Female, multilingual",
}];

const SECONDARY: &[RecommendedVoice] = &[
    RecommendedVoice {
        voice_id: "21m00Tcm4TlvDq8ikWAM",
        name: "Rachel",
        description: "Female, default",
    },
    RecommendedVoice {
        voice_id: "TxGEqnHWrfWFTfGW9XjX",
        name: "Josh",
        description: "Male, deep",
    },
];

/// Suggested voices for `role`. The native-language entry is a multilingual
/// voice; pick one from the account's library for better results.
pub const fn recommended_voices(role: VoiceRole) -> &'static [RecommendedVoice] {
    match role {
        VoiceRole::Target => FRENCH,
        VoiceRole::Native => NATIVE,
        VoiceRole::Secondary => SECONDARY,
    }
}

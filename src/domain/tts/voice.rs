use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback speed bounds accepted by the provider.
pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;
pub const DEFAULT_SPEED: f32 = 1.0;

/// The closed set of voices the API accepts. Unknown identifiers are
/// rejected at deserialization time, before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    #[default]
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Voice::Alloy => "Alloy",
            Voice::Echo => "Echo",
            Voice::Fable => "Fable",
            Voice::Onyx => "Onyx",
            Voice::Nova => "Nova",
            Voice::Shimmer => "Shimmer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Voice::Alloy => "Neutral, clear voice",
            Voice::Echo => "Soft male voice",
            Voice::Fable => "Expressive narrative voice",
            Voice::Onyx => "Deep male voice",
            Voice::Nova => "Energetic female voice",
            Voice::Shimmer => "Soft female voice",
        }
    }

    pub fn all() -> &'static [Voice] {
        &[
            Voice::Alloy,
            Voice::Echo,
            Voice::Fable,
            Voice::Onyx,
            Voice::Nova,
            Voice::Shimmer,
        ]
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_deserializes_lowercase_identifiers() {
        let voice: Voice = serde_json::from_str("\"nova\"").unwrap();
        assert_eq!(voice, Voice::Nova);
    }

    #[test]
    fn test_voice_rejects_unknown_identifier() {
        let result: Result<Voice, _> = serde_json::from_str("\"robotic\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_voice_is_onyx() {
        assert_eq!(Voice::default(), Voice::Onyx);
    }
}

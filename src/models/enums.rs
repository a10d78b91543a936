use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored string does not map to a known enum variant.
#[derive(Debug, Error)]
#[error("Invalid value '{value}' for {field}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(Sender {
    User => "user",
    Assistant => "assistant",
});

impl Severity {
    /// Medium and high tiers warrant an explicit consultation urging.
    pub fn needs_professional_urging(&self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn severity_round_trips_through_str() {
        for s in [Severity::Low, Severity::Medium, Severity::High] {
            assert_eq!(Severity::from_str(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn severity_rejects_unknown_value() {
        let err = Severity::from_str("critical").unwrap_err();
        assert_eq!(err.field, "Severity");
        assert_eq!(err.value, "critical");
    }

    #[test]
    fn severity_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn urging_tiers() {
        assert!(!Severity::Low.needs_professional_urging());
        assert!(Severity::Medium.needs_professional_urging());
        assert!(Severity::High.needs_professional_urging());
    }
}

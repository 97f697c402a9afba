//! Upgrade gate — deploy-time switches for tier-restricted feeds.
//!
//! Timeline and mention reads need a paid X API tier. When a flag is on,
//! the gateway returns a structured "requires upgrade" result without
//! ever calling the provider. This is composition-time configuration,
//! not a runtime decision from quota state.

/// Which feed operations are gated on the current deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeGate {
    /// Gate `my_tweets` (timeline reads).
    pub timeline: bool,
    /// Gate `mentions` (recent-search reads).
    pub mentions: bool,
}

impl UpgradeGate {
    /// Gate nothing (full API tier).
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Read gate flags from `X_GATE_TIMELINE` / `X_GATE_MENTIONS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeline: env_flag("X_GATE_TIMELINE"),
            mentions: env_flag("X_GATE_MENTIONS"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_open() {
        let gate = UpgradeGate::open();
        assert!(!gate.timeline);
        assert!(!gate.mentions);
    }

    #[test]
    fn test_env_flag_values() {
        std::env::set_var("ROOST_TEST_GATE_FLAG", "true");
        assert!(env_flag("ROOST_TEST_GATE_FLAG"));
        std::env::set_var("ROOST_TEST_GATE_FLAG", "0");
        assert!(!env_flag("ROOST_TEST_GATE_FLAG"));
        std::env::remove_var("ROOST_TEST_GATE_FLAG");
        assert!(!env_flag("ROOST_TEST_GATE_FLAG"));
    }
}

use crate::game_state::arimaa_rules::DEFAULT_ZOBRIST_SEED;
use crate::move_generation::turn_apply::MoveChecks;

/// How strictly externally supplied moves and setups are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Validate every step and the turn as a whole.
    pub strict_checks: bool,
    /// Enforce home ranks, colors and piece quotas on setup moves.
    pub strict_setup: bool,
}

impl RulesConfig {
    pub fn move_checks(&self) -> MoveChecks {
        if self.strict_checks {
            MoveChecks::Strict
        } else {
            MoveChecks::Permissive
        }
    }

    pub fn setup_checks(&self) -> MoveChecks {
        if self.strict_setup {
            MoveChecks::Strict
        } else {
            MoveChecks::Permissive
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            strict_checks: true,
            strict_setup: true,
        }
    }
}

/// Settings for the position analysis tool, read from environment
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub rules: RulesConfig,
    /// Random playouts run from the analysed position.
    pub playouts: u32,
    /// Turn limit of a single playout.
    pub playout_turn_limit: u32,
    /// Seed of the playout random generator.
    pub seed: u64,
    /// Seed of the position key table.
    pub zobrist_seed: u64,
}

impl AnalysisConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to the defaults
    /// for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AnalysisConfig::default();
        let parsed = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(default)
        };

        AnalysisConfig {
            rules: RulesConfig {
                strict_checks: flag("ARIMAA_STRICT_CHECKS", defaults.rules.strict_checks),
                strict_setup: flag("ARIMAA_STRICT_SETUP", defaults.rules.strict_setup),
            },
            playouts: parsed("ARIMAA_PLAYOUTS")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.playouts),
            playout_turn_limit: parsed("ARIMAA_PLAYOUT_TURN_LIMIT")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.playout_turn_limit),
            seed: parsed("ARIMAA_SEED").unwrap_or(defaults.seed),
            zobrist_seed: parsed("ARIMAA_ZOBRIST_SEED").unwrap_or(defaults.zobrist_seed),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rules: RulesConfig::default(),
            playouts: 100,
            playout_turn_limit: 500,
            seed: 0,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> AnalysisConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AnalysisConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.playouts, 100);
        assert_eq!(config.playout_turn_limit, 500);
        assert_eq!(config.seed, 0);
        assert_eq!(config.zobrist_seed, DEFAULT_ZOBRIST_SEED);
        assert_eq!(config.rules.move_checks(), MoveChecks::Strict);
        assert_eq!(config.rules.setup_checks(), MoveChecks::Strict);
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(lookup_from(&[]), AnalysisConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = lookup_from(&[
            ("ARIMAA_STRICT_CHECKS", "off"),
            ("ARIMAA_STRICT_SETUP", "false"),
            ("ARIMAA_PLAYOUTS", "12"),
            ("ARIMAA_SEED", "99"),
            ("ARIMAA_ZOBRIST_SEED", "5"),
        ]);
        assert_eq!(config.rules.move_checks(), MoveChecks::Permissive);
        assert_eq!(config.rules.setup_checks(), MoveChecks::Permissive);
        assert_eq!(config.playouts, 12);
        assert_eq!(config.seed, 99);
        assert_eq!(config.zobrist_seed, 5);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = lookup_from(&[("ARIMAA_PLAYOUTS", "many"), ("ARIMAA_STRICT_CHECKS", "maybe")]);
        assert_eq!(config.playouts, 100);
        assert!(config.rules.strict_checks);
    }
}

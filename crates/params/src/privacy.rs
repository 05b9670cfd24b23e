//! Privacy tiers that a depositor can choose from when entering the bridge.
//!
//! Each tier fixes how many mixing hops a deposit goes through, how many decoys accompany it, how
//! long it must wait after mixing before it can be withdrawn and how many outputs it is split
//! into. The tier is chosen once at deposit time and never changes afterwards.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ParamsError;

/// The named privacy tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    /// Few hops and roughly a minute of delay.
    Fast,

    /// The default tier.
    #[default]
    Standard,

    /// Many hops and a full day of delay.
    Maximum,
}

impl PrivacyLevel {
    /// All tiers, in increasing order of privacy.
    pub const ALL: [PrivacyLevel; 3] = [Self::Fast, Self::Standard, Self::Maximum];

    /// Resolves a tier by name, falling back to [`PrivacyLevel::Standard`] for missing or unknown
    /// names.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// Returns the canonical name of the tier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Fast => "fast",
            PrivacyLevel::Standard => "standard",
            PrivacyLevel::Maximum => "maximum",
        }
    }
}

impl Display for PrivacyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::Fast),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            other => Err(ParamsError::UnknownPrivacyLevel(other.to_string())),
        }
    }
}

/// The mixing configuration attached to a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// Number of mixing hops the deposit goes through.
    #[serde(rename = "hops")]
    pub hop_count: u64,

    /// Number of decoys per real output.
    pub decoy_multiplier: u64,

    /// Delay after mixing before the deposit can be withdrawn, in (possibly fractional) hours.
    pub delay_hours: f64,

    /// Number of outputs the deposit is split into.
    pub split_count: u64,
}

/// The configuration of every privacy tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyTiers {
    /// Configuration of [`PrivacyLevel::Fast`].
    pub fast: PrivacyConfig,

    /// Configuration of [`PrivacyLevel::Standard`].
    pub standard: PrivacyConfig,

    /// Configuration of [`PrivacyLevel::Maximum`].
    pub maximum: PrivacyConfig,
}

impl PrivacyTiers {
    /// Returns the configuration of the given tier.
    pub const fn get(&self, level: PrivacyLevel) -> &PrivacyConfig {
        match level {
            PrivacyLevel::Fast => &self.fast,
            PrivacyLevel::Standard => &self.standard,
            PrivacyLevel::Maximum => &self.maximum,
        }
    }

    /// Checks that every tier has a finite, non-negative delay.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for level in PrivacyLevel::ALL {
            let delay_hours = self.get(level).delay_hours;
            if !delay_hours.is_finite() || delay_hours < 0.0 {
                return Err(ParamsError::InvalidDelay {
                    tier: level.to_string(),
                    delay_hours,
                });
            }
        }

        Ok(())
    }
}

impl Default for PrivacyTiers {
    fn default() -> Self {
        Self {
            // ~1 minute of delay.
            fast: PrivacyConfig {
                hop_count: 5,
                decoy_multiplier: 5,
                delay_hours: 0.017,
                split_count: 1,
            },
            standard: PrivacyConfig {
                hop_count: 10,
                decoy_multiplier: 10,
                delay_hours: 1.0,
                split_count: 1,
            },
            maximum: PrivacyConfig {
                hop_count: 20,
                decoy_multiplier: 20,
                delay_hours: 24.0,
                split_count: 3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_falls_back_to_standard() {
        assert_eq!(PrivacyLevel::resolve(Some("paranoid")), PrivacyLevel::Standard);
        assert_eq!(PrivacyLevel::resolve(Some("")), PrivacyLevel::Standard);
        assert_eq!(PrivacyLevel::resolve(None), PrivacyLevel::Standard);
        assert_eq!(PrivacyLevel::resolve(Some("fast")), PrivacyLevel::Fast);
        assert_eq!(PrivacyLevel::resolve(Some("maximum")), PrivacyLevel::Maximum);
    }

    #[test]
    fn test_level_names_round_trip() {
        for level in PrivacyLevel::ALL {
            assert_eq!(level.as_str().parse::<PrivacyLevel>(), Ok(level));
        }

        assert_eq!(
            "FAST".parse::<PrivacyLevel>(),
            Err(ParamsError::UnknownPrivacyLevel("FAST".to_string()))
        );
    }

    #[test]
    fn test_default_tiers() {
        let tiers = PrivacyTiers::default();

        assert_eq!(tiers.get(PrivacyLevel::Fast).hop_count, 5);
        assert_eq!(tiers.get(PrivacyLevel::Standard).delay_hours, 1.0);
        assert_eq!(tiers.get(PrivacyLevel::Maximum).split_count, 3);
        assert!(tiers.validate().is_ok());
    }

    #[test]
    fn test_negative_delay_is_rejected() {
        let mut tiers = PrivacyTiers::default();
        tiers.maximum.delay_hours = -1.0;

        assert!(matches!(
            tiers.validate(),
            Err(ParamsError::InvalidDelay { ref tier, .. }) if tier == "maximum"
        ));
    }

    #[test]
    fn test_privacy_tiers_serde() {
        let tiers_toml = r#"
            [fast]
            hops = 5
            decoy_multiplier = 5
            delay_hours = 0.017
            split_count = 1

            [standard]
            hops = 10
            decoy_multiplier = 10
            delay_hours = 1.0
            split_count = 1

            [maximum]
            hops = 20
            decoy_multiplier = 20
            delay_hours = 24.0
            split_count = 3
        "#;

        let tiers = toml::from_str::<PrivacyTiers>(tiers_toml).unwrap();
        assert_eq!(tiers, PrivacyTiers::default());
    }
}

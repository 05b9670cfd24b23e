//! The privacy score assigned to a deposit when it is created.

use shadow_params::privacy::PrivacyConfig;

/// Upper bound of the privacy score.
pub const MAX_PRIVACY_SCORE: u64 = 100;

/// Bonus every deposit gets for entering the shielded pool at all.
const BASE_SCORE: u64 = 20;

/// Delay beyond which waiting longer earns no extra score.
const MAX_SCORED_DELAY_HOURS: u64 = 24;

/// Computes the privacy score of a deposit with the given configuration.
///
/// ```text
/// min(100, hops*30/20 + decoys*10/20 + min(24, floor(delay_hours))*20/24 + 20)
/// ```
///
/// Each term uses integer division, so sub-hour delays contribute nothing and the default tiers
/// score 29 (fast), 40 (standard) and 80 (maximum).
pub fn privacy_score(config: &PrivacyConfig) -> u64 {
    // Truncation is intended; `as` also maps negative and NaN delays to 0.
    let delay_hours = (config.delay_hours.floor() as u64).min(MAX_SCORED_DELAY_HOURS);

    let hops = config.hop_count.saturating_mul(30) / 20;
    let decoys = config.decoy_multiplier.saturating_mul(10) / 20;
    let delay = delay_hours * 20 / 24;

    hops.saturating_add(decoys)
        .saturating_add(delay)
        .saturating_add(BASE_SCORE)
        .min(MAX_PRIVACY_SCORE)
}

#[cfg(test)]
mod tests {
    use shadow_params::privacy::{PrivacyLevel, PrivacyTiers};

    use super::*;

    #[test]
    fn test_default_tier_scores() {
        let tiers = PrivacyTiers::default();

        assert_eq!(privacy_score(tiers.get(PrivacyLevel::Fast)), 29);
        assert_eq!(privacy_score(tiers.get(PrivacyLevel::Standard)), 40);
        assert_eq!(privacy_score(tiers.get(PrivacyLevel::Maximum)), 80);
    }

    #[test]
    fn test_score_is_capped() {
        let config = PrivacyConfig {
            hop_count: 100,
            decoy_multiplier: 100,
            delay_hours: 240.0,
            split_count: 5,
        };

        assert_eq!(privacy_score(&config), MAX_PRIVACY_SCORE);
    }

    #[test]
    fn test_delay_is_capped_at_a_day() {
        let mut config = *PrivacyTiers::default().get(PrivacyLevel::Maximum);
        let at_one_day = privacy_score(&config);

        config.delay_hours = 72.0;
        assert_eq!(privacy_score(&config), at_one_day);
    }
}

use serde::{Deserialize, Serialize};

use super::PriorityTier;

/// One rubric step: values up to `up_to` (inclusive) earn `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub up_to: u32,
    pub points: u32,
}

impl ScoreBucket {
    pub const fn new(up_to: u32, points: u32) -> Self {
        Self { up_to, points }
    }
}

/// Points granted per preventive alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreventivePoints {
    pub urgent: u32,
    pub critical: u32,
    pub attention: u32,
    pub none: u32,
}

/// Points granted per loyalty program tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyPoints {
    pub full: u32,
    pub partial: u32,
    pub none: u32,
}

/// Inclusive score ceiling mapped to a tier; thresholds are checked in order
/// and totals beyond the last one resolve to [`PriorityTier::Urgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub up_to: u32,
    pub tier: PriorityTier,
}

/// Rubric configuration consulted by the priority engine.
///
/// Every weight the engine applies lives here as data, so deployments and
/// tests can swap the rubric wholesale without touching scoring code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Ascending customer-count buckets; counts past the last bucket saturate
    /// at its points.
    pub customer_base_buckets: Vec<ScoreBucket>,
    pub preventive_points: PreventivePoints,
    /// Company names granted the enterprise bonus. Matched exactly, ignoring
    /// case; substrings never qualify.
    pub enterprise_accounts: Vec<String>,
    pub enterprise_bonus: u32,
    /// Account age buckets in whole months; older accounts stay at
    /// `account_age_ceiling`.
    pub account_age_buckets: Vec<ScoreBucket>,
    pub account_age_ceiling: u32,
    /// Indexed by the 0-10 NPS answer. Detractors outrank passives here so
    /// unhappy voices surface first.
    pub nps_points: [u32; 11],
    pub loyalty_points: LoyaltyPoints,
    /// Quiet submitters score higher; volumes past the last bucket drop to
    /// `suggestion_volume_floor`.
    pub suggestion_volume_buckets: Vec<ScoreBucket>,
    pub suggestion_volume_floor: u32,
    pub tenure_buckets: Vec<ScoreBucket>,
    pub tenure_ceiling: u32,
    /// Points each community vote adds on top of the profile score.
    pub vote_weight: u32,
    pub tier_thresholds: Vec<TierThreshold>,
}

impl ScoringConfig {
    pub fn is_enterprise_account(&self, company: &str) -> bool {
        let candidate = company.trim().to_lowercase();
        self.enterprise_accounts
            .iter()
            .any(|entry| entry.trim().to_lowercase() == candidate)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            customer_base_buckets: vec![
                ScoreBucket::new(5_000, 10),
                ScoreBucket::new(10_000, 20),
                ScoreBucket::new(15_000, 30),
                ScoreBucket::new(20_000, 40),
                ScoreBucket::new(30_000, 50),
                ScoreBucket::new(50_000, 60),
                ScoreBucket::new(60_000, 80),
            ],
            preventive_points: PreventivePoints {
                urgent: 50,
                critical: 40,
                attention: 30,
                none: 0,
            },
            enterprise_accounts: vec![
                "Alcans Telecom Ltda".to_string(),
                "Vetorial Internet".to_string(),
                "Master Cabo Servicos".to_string(),
                "Nexus Fibra Telecom".to_string(),
            ],
            enterprise_bonus: 100,
            account_age_buckets: vec![
                ScoreBucket::new(1, 1),
                ScoreBucket::new(3, 3),
                ScoreBucket::new(6, 8),
                ScoreBucket::new(12, 15),
            ],
            account_age_ceiling: 15,
            nps_points: [50, 80, 90, 70, 60, 50, 40, 30, 20, 20, 20],
            loyalty_points: LoyaltyPoints {
                full: 50,
                partial: 10,
                none: 30,
            },
            suggestion_volume_buckets: vec![
                ScoreBucket::new(3, 75),
                ScoreBucket::new(10, 50),
                ScoreBucket::new(25, 30),
            ],
            suggestion_volume_floor: 10,
            tenure_buckets: vec![ScoreBucket::new(5, 10), ScoreBucket::new(9, 20)],
            tenure_ceiling: 30,
            vote_weight: 2,
            tier_thresholds: vec![
                TierThreshold {
                    up_to: 100,
                    tier: PriorityTier::Five,
                },
                TierThreshold {
                    up_to: 150,
                    tier: PriorityTier::Four,
                },
                TierThreshold {
                    up_to: 250,
                    tier: PriorityTier::Three,
                },
                TierThreshold {
                    up_to: 300,
                    tier: PriorityTier::Two,
                },
                TierThreshold {
                    up_to: 400,
                    tier: PriorityTier::One,
                },
            ],
        }
    }
}

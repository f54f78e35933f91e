mod config;
mod rules;

pub use config::{
    LoyaltyPoints, PreventivePoints, ScoreBucket, ScoringConfig, TierThreshold,
};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::ClientProfile;

/// Stateless engine applying the rubric configuration to client profiles.
pub struct PriorityEngine {
    config: ScoringConfig,
}

impl PriorityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a profile as of today.
    pub fn score(&self, profile: &ClientProfile) -> PriorityScore {
        self.score_on(profile, Local::now().date_naive())
    }

    /// Score a profile as of a fixed date. Identical inputs always produce
    /// the identical breakdown.
    pub fn score_on(&self, profile: &ClientProfile, today: NaiveDate) -> PriorityScore {
        let (components, total) = rules::score_profile(profile, &self.config, today);

        PriorityScore {
            total,
            tier: self.tier_for(total),
            components,
        }
    }

    /// Map a total score onto its attention tier.
    pub fn tier_for(&self, total: u32) -> PriorityTier {
        self.config
            .tier_thresholds
            .iter()
            .find(|threshold| total <= threshold.up_to)
            .map(|threshold| threshold.tier)
            .unwrap_or(PriorityTier::Urgent)
    }

    /// Profile score plus the community vote contribution used for ranking.
    pub fn ranking_score(&self, profile_total: u32, votes: u32) -> u32 {
        profile_total.saturating_add(votes.saturating_mul(self.config.vote_weight))
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Attention tiers, lowest to highest. Tier five waits; urgent jumps the
/// queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "urgent")]
    Urgent,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::Five => "5",
            PriorityTier::Four => "4",
            PriorityTier::Three => "3",
            PriorityTier::Two => "2",
            PriorityTier::One => "1",
            PriorityTier::Urgent => "urgent",
        }
    }

    pub const fn ordered() -> [PriorityTier; 6] {
        [
            PriorityTier::Five,
            PriorityTier::Four,
            PriorityTier::Three,
            PriorityTier::Two,
            PriorityTier::One,
            PriorityTier::Urgent,
        ]
    }
}

/// Factors permitted in the priority rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    CustomerBase,
    PreventiveRisk,
    EnterpriseAccount,
    AccountAge,
    Nps,
    Loyalty,
    SuggestionVolume,
    Tenure,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::CustomerBase => "customer base",
            ScoreFactor::PreventiveRisk => "preventive risk",
            ScoreFactor::EnterpriseAccount => "enterprise account",
            ScoreFactor::AccountAge => "account age",
            ScoreFactor::Nps => "nps",
            ScoreFactor::Loyalty => "loyalty",
            ScoreFactor::SuggestionVolume => "suggestion volume",
            ScoreFactor::Tenure => "tenure",
        }
    }
}

/// Discrete contribution to a priority score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u32,
    pub notes: String,
}

/// Scoring output describing the composite total and its breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScore {
    pub total: u32,
    pub tier: PriorityTier,
    pub components: Vec<ScoreComponent>,
}

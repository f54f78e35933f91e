//! Suggestion board core: priority scoring, administrative state with
//! change notification, and stable prioritized ranking.

pub mod domain;
pub mod ranking;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ClientProfile, DevelopmentStatus, FieldPatch, LoyaltyTier, PreventiveStatus, StatePatch,
    SuggestionId, SuggestionRecord, SuggestionState, SuggestionStateView,
};
pub use ranking::{rank_suggestions, RankedSuggestion, RankingMode};
pub use router::board_router;
pub use scoring::{
    LoyaltyPoints, PreventivePoints, PriorityEngine, PriorityScore, PriorityTier, ScoreBucket,
    ScoreComponent, ScoreFactor, ScoringConfig, TierThreshold,
};
pub use service::{BoardEntry, BoardSummary, StageCount, SuggestionBoardService, TierCount};
pub use store::{
    FileStateStorage, InMemoryStateStorage, StateStorage, StorageError, Subscription,
    SuggestionStore, STATE_STORAGE_KEY,
};

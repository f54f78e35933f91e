use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::domain::{ClientProfile, DevelopmentStatus, SuggestionRecord, SuggestionStateView};
use super::ranking::{rank_suggestions, RankingMode};
use super::scoring::{PriorityEngine, PriorityScore, PriorityTier, ScoringConfig};
use super::store::{StateStorage, SuggestionStore};
use crate::board::importer::BoardDataset;

/// Service composing the priority engine, the suggestion store, and the
/// imported board dataset.
pub struct SuggestionBoardService<S> {
    engine: PriorityEngine,
    store: SuggestionStore<S>,
    dataset: Arc<BoardDataset>,
}

impl<S> SuggestionBoardService<S>
where
    S: StateStorage + 'static,
{
    pub fn new(storage: S, dataset: Arc<BoardDataset>, config: ScoringConfig) -> Self {
        Self {
            engine: PriorityEngine::new(config),
            store: SuggestionStore::new(storage),
            dataset,
        }
    }

    pub fn engine(&self) -> &PriorityEngine {
        &self.engine
    }

    pub fn store(&self) -> &SuggestionStore<S> {
        &self.store
    }

    pub fn dataset(&self) -> &BoardDataset {
        &self.dataset
    }

    /// Rank the board as of today. Archived suggestions are hidden unless
    /// `include_archived` is set.
    pub fn board(&self, mode: RankingMode, include_archived: bool) -> Vec<BoardEntry> {
        self.board_on(mode, include_archived, Local::now().date_naive())
    }

    pub fn board_on(
        &self,
        mode: RankingMode,
        include_archived: bool,
        today: NaiveDate,
    ) -> Vec<BoardEntry> {
        let visible: Vec<SuggestionRecord> = self
            .dataset
            .suggestions
            .iter()
            .filter(|record| include_archived || !self.store.is_archived(&record.id))
            .cloned()
            .collect();

        rank_suggestions(&self.engine, &visible, mode, today)
            .into_iter()
            .map(|ranked| {
                let state = self.store.state_view(&ranked.record.id);
                BoardEntry {
                    position: ranked.position,
                    record: ranked.record,
                    priority: ranked.priority,
                    ranking_score: ranked.ranking_score,
                    state,
                }
            })
            .collect()
    }

    /// Score an ad-hoc profile without touching the board.
    pub fn preview_score(&self, profile: &ClientProfile) -> PriorityScore {
        self.engine.score(profile)
    }
}

/// One row of the prioritized board joined with its administrative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardEntry {
    pub position: usize,
    pub record: SuggestionRecord,
    pub priority: PriorityScore,
    pub ranking_score: u32,
    pub state: SuggestionStateView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierCount {
    pub tier: PriorityTier,
    pub tier_label: &'static str,
    pub suggestions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    pub stage: DevelopmentStatus,
    pub stage_label: &'static str,
    pub suggestions: usize,
}

/// Per-tier and per-stage counts for a rendered board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    pub tier_counts: Vec<TierCount>,
    pub stage_counts: Vec<StageCount>,
}

impl BoardSummary {
    /// Tally entries by tier and by delivery stage, in canonical order.
    /// Tiers and stages with no suggestions are omitted.
    pub fn of(entries: &[BoardEntry]) -> Self {
        let mut by_tier: HashMap<PriorityTier, usize> = HashMap::new();
        let mut by_stage: HashMap<DevelopmentStatus, usize> = HashMap::new();
        for entry in entries {
            *by_tier.entry(entry.priority.tier).or_default() += 1;
            *by_stage.entry(entry.state.development_status).or_default() += 1;
        }

        let tier_counts = PriorityTier::ordered()
            .into_iter()
            .filter_map(|tier| {
                by_tier.get(&tier).map(|count| TierCount {
                    tier,
                    tier_label: tier.label(),
                    suggestions: *count,
                })
            })
            .collect();

        let stage_counts = DevelopmentStatus::ordered()
            .into_iter()
            .filter_map(|stage| {
                by_stage.get(&stage).map(|count| StageCount {
                    stage,
                    stage_label: stage.label(),
                    suggestions: *count,
                })
            })
            .collect();

        Self {
            tier_counts,
            stage_counts,
        }
    }
}

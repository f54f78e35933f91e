use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::SuggestionRecord;
use super::scoring::{PriorityEngine, PriorityScore};

/// Sort key for the prioritized board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    #[default]
    Score,
    Votes,
    Comments,
}

impl RankingMode {
    pub const fn label(self) -> &'static str {
        match self {
            RankingMode::Score => "score",
            RankingMode::Votes => "votes",
            RankingMode::Comments => "comments",
        }
    }
}

/// A board entry with its computed priority and 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSuggestion {
    pub position: usize,
    pub record: SuggestionRecord,
    pub priority: PriorityScore,
    /// Profile total plus the weighted community votes.
    pub ranking_score: u32,
}

/// Order suggestions for the board, highest first.
///
/// Scores are recomputed from the profiles on every call; nothing is cached
/// between rankings. The sort is stable, so entries tying on the chosen key
/// keep their input order.
pub fn rank_suggestions(
    engine: &PriorityEngine,
    suggestions: &[SuggestionRecord],
    mode: RankingMode,
    today: NaiveDate,
) -> Vec<RankedSuggestion> {
    let mut scored: Vec<(SuggestionRecord, PriorityScore, u32)> = suggestions
        .iter()
        .map(|record| {
            let priority = engine.score_on(&record.client, today);
            let ranking_score = engine.ranking_score(priority.total, record.votes);
            (record.clone(), priority, ranking_score)
        })
        .collect();

    scored.sort_by_key(|(record, _, ranking_score)| {
        Reverse(match mode {
            RankingMode::Score => *ranking_score,
            RankingMode::Votes => record.votes,
            RankingMode::Comments => record.comments,
        })
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (record, priority, ranking_score))| RankedSuggestion {
            position: index + 1,
            record,
            priority,
            ranking_score,
        })
        .collect()
}

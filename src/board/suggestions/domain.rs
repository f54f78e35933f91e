use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for board suggestions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SuggestionId(pub String);

impl std::fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Preventive-maintenance alert level reported for a client account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreventiveStatus {
    Urgent,
    Critical,
    Attention,
    #[default]
    None,
}

impl PreventiveStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PreventiveStatus::Urgent => "urgent",
            PreventiveStatus::Critical => "critical",
            PreventiveStatus::Attention => "attention",
            PreventiveStatus::None => "none",
        }
    }
}

/// Participation level in the loyalty program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    Full,
    Partial,
    #[default]
    None,
}

impl LoyaltyTier {
    pub const fn label(self) -> &'static str {
        match self {
            LoyaltyTier::Full => "full",
            LoyaltyTier::Partial => "partial",
            LoyaltyTier::None => "none",
        }
    }
}

/// Delivery stage tracked for a suggestion once engineering picks it up.
///
/// Serialized in kebab case to stay compatible with the persisted board blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DevelopmentStatus {
    #[default]
    Backlog,
    InDevelopment,
    Testing,
    Completed,
}

impl DevelopmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DevelopmentStatus::Backlog => "backlog",
            DevelopmentStatus::InDevelopment => "in-development",
            DevelopmentStatus::Testing => "testing",
            DevelopmentStatus::Completed => "completed",
        }
    }

    pub const fn ordered() -> [DevelopmentStatus; 4] {
        [
            DevelopmentStatus::Backlog,
            DevelopmentStatus::InDevelopment,
            DevelopmentStatus::Testing,
            DevelopmentStatus::Completed,
        ]
    }
}

/// Snapshot of the submitting client consumed by the priority engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub company: String,
    pub contact_email: String,
    /// Subscribers served by the client's own operation.
    pub total_customers: u32,
    pub preventive_status: PreventiveStatus,
    /// Latest NPS answer on the 0-10 scale; out-of-range values are clamped.
    pub nps: u8,
    pub loyalty: LoyaltyTier,
    pub suggestions_submitted: u32,
    pub tenure_years: u32,
    pub account_created_on: NaiveDate,
}

/// A suggestion as it appears on the board, with its vote and comment tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub id: SuggestionId,
    pub title: String,
    pub votes: u32,
    pub comments: u32,
    pub client: ClientProfile,
}

/// Administrative lifecycle attached to a suggestion.
///
/// Every field is optional; a suggestion nobody has touched reads as all
/// absent, and the accessors on [`SuggestionStateView`] resolve defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_task_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_roadmap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_status: Option<DevelopmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl SuggestionState {
    pub fn is_untouched(&self) -> bool {
        self.jira_task_code.is_none()
            && self.in_roadmap.is_none()
            && self.roadmap_id.is_none()
            && self.development_status.is_none()
            && self.archived.is_none()
    }

    pub fn to_view(&self, id: SuggestionId) -> SuggestionStateView {
        SuggestionStateView {
            suggestion_id: id,
            jira_task_code: self.jira_task_code.clone(),
            in_roadmap: self.in_roadmap.unwrap_or(false),
            roadmap_id: self.roadmap_id.clone(),
            development_status: self.development_status.unwrap_or_default(),
            archived: self.archived.unwrap_or(false),
        }
    }
}

/// Three-way field update: leave the stored value alone, clear it back to
/// absent, or replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T: Clone> FieldPatch<T> {
    pub fn apply(&self, slot: &mut Option<T>) {
        match self {
            FieldPatch::Keep => {}
            FieldPatch::Clear => *slot = None,
            FieldPatch::Set(value) => *slot = Some(value.clone()),
        }
    }
}

/// Partial update merged over a [`SuggestionState`]. Fields default to
/// [`FieldPatch::Keep`], so a patch only touches what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub jira_task_code: FieldPatch<String>,
    pub in_roadmap: FieldPatch<bool>,
    pub roadmap_id: FieldPatch<String>,
    pub development_status: FieldPatch<DevelopmentStatus>,
    pub archived: FieldPatch<bool>,
}

impl StatePatch {
    /// Attach a Jira task code to the suggestion.
    pub fn link_jira(code: impl Into<String>) -> Self {
        Self {
            jira_task_code: FieldPatch::Set(code.into()),
            ..Self::default()
        }
    }

    /// Place the suggestion on the roadmap and move it into development.
    pub fn add_to_roadmap(roadmap_id: impl Into<String>) -> Self {
        Self {
            in_roadmap: FieldPatch::Set(true),
            roadmap_id: FieldPatch::Set(roadmap_id.into()),
            development_status: FieldPatch::Set(DevelopmentStatus::InDevelopment),
            ..Self::default()
        }
    }

    /// Take the suggestion off the roadmap and send it back to the backlog.
    pub fn remove_from_roadmap() -> Self {
        Self {
            in_roadmap: FieldPatch::Set(false),
            roadmap_id: FieldPatch::Clear,
            development_status: FieldPatch::Set(DevelopmentStatus::Backlog),
            ..Self::default()
        }
    }

    pub fn development_status(status: DevelopmentStatus) -> Self {
        Self {
            development_status: FieldPatch::Set(status),
            ..Self::default()
        }
    }

    pub fn archived(flag: bool) -> Self {
        Self {
            archived: FieldPatch::Set(flag),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, state: &mut SuggestionState) {
        self.jira_task_code.apply(&mut state.jira_task_code);
        self.in_roadmap.apply(&mut state.in_roadmap);
        self.roadmap_id.apply(&mut state.roadmap_id);
        self.development_status.apply(&mut state.development_status);
        self.archived.apply(&mut state.archived);
    }
}

/// Resolved representation of a suggestion's administrative state for API
/// responses and reports. Absent flags read as their defaults here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionStateView {
    pub suggestion_id: SuggestionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_task_code: Option<String>,
    pub in_roadmap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap_id: Option<String>,
    pub development_status: DevelopmentStatus,
    pub archived: bool,
}

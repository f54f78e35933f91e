use chrono::{Datelike, NaiveDate};

use super::super::domain::{ClientProfile, LoyaltyTier, PreventiveStatus};
use super::config::{ScoreBucket, ScoringConfig};
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn score_profile(
    profile: &ClientProfile,
    config: &ScoringConfig,
    today: NaiveDate,
) -> (Vec<ScoreComponent>, u32) {
    let mut components = Vec::new();
    let mut total: u32 = 0;

    let base_saturation = config
        .customer_base_buckets
        .last()
        .map(|bucket| bucket.points)
        .unwrap_or(0);
    let base_points = bucket_points(
        &config.customer_base_buckets,
        profile.total_customers,
        base_saturation,
    );
    components.push(ScoreComponent {
        factor: ScoreFactor::CustomerBase,
        points: base_points,
        notes: format!("{} subscribers on the client's network", profile.total_customers),
    });
    total += base_points;

    let preventive_points = match profile.preventive_status {
        PreventiveStatus::Urgent => config.preventive_points.urgent,
        PreventiveStatus::Critical => config.preventive_points.critical,
        PreventiveStatus::Attention => config.preventive_points.attention,
        PreventiveStatus::None => config.preventive_points.none,
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::PreventiveRisk,
        points: preventive_points,
        notes: format!("preventive status {}", profile.preventive_status.label()),
    });
    total += preventive_points;

    if config.is_enterprise_account(&profile.company) {
        components.push(ScoreComponent {
            factor: ScoreFactor::EnterpriseAccount,
            points: config.enterprise_bonus,
            notes: format!("{} is on the enterprise account list", profile.company),
        });
        total += config.enterprise_bonus;
    } else {
        components.push(ScoreComponent {
            factor: ScoreFactor::EnterpriseAccount,
            points: 0,
            notes: "not an enterprise account".to_string(),
        });
    }

    let account_age_months = whole_months_between(profile.account_created_on, today);
    let age_points = bucket_points(
        &config.account_age_buckets,
        account_age_months,
        config.account_age_ceiling,
    );
    components.push(ScoreComponent {
        factor: ScoreFactor::AccountAge,
        points: age_points,
        notes: format!("account opened {account_age_months} month(s) ago"),
    });
    total += age_points;

    let nps_answer = profile.nps.min(10);
    let nps_points = config.nps_points[usize::from(nps_answer)];
    components.push(ScoreComponent {
        factor: ScoreFactor::Nps,
        points: nps_points,
        notes: format!("latest nps answer {nps_answer}"),
    });
    total += nps_points;

    let loyalty_points = match profile.loyalty {
        LoyaltyTier::Full => config.loyalty_points.full,
        LoyaltyTier::Partial => config.loyalty_points.partial,
        LoyaltyTier::None => config.loyalty_points.none,
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Loyalty,
        points: loyalty_points,
        notes: format!("loyalty tier {}", profile.loyalty.label()),
    });
    total += loyalty_points;

    let volume_points = bucket_points(
        &config.suggestion_volume_buckets,
        profile.suggestions_submitted,
        config.suggestion_volume_floor,
    );
    components.push(ScoreComponent {
        factor: ScoreFactor::SuggestionVolume,
        points: volume_points,
        notes: format!("{} suggestion(s) submitted overall", profile.suggestions_submitted),
    });
    total += volume_points;

    let tenure_points = bucket_points(
        &config.tenure_buckets,
        profile.tenure_years,
        config.tenure_ceiling,
    );
    components.push(ScoreComponent {
        factor: ScoreFactor::Tenure,
        points: tenure_points,
        notes: format!("{} year(s) as a client", profile.tenure_years),
    });
    total += tenure_points;

    (components, total)
}

fn bucket_points(buckets: &[ScoreBucket], value: u32, beyond: u32) -> u32 {
    buckets
        .iter()
        .find(|bucket| value <= bucket.up_to)
        .map(|bucket| bucket.points)
        .unwrap_or(beyond)
}

/// Whole months elapsed between two dates, clamped at zero when `from` lies
/// in the future.
pub(crate) fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if from > to {
        return 0;
    }
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

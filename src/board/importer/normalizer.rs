use crate::board::suggestions::{LoyaltyTier, PreventiveStatus};

/// Strip zero-width characters, collapse whitespace, and lowercase so raw
/// dataset cells compare predictably.
pub(crate) fn normalize_token(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Map a raw preventive cell onto a status. Exports arrive in both English
/// and Portuguese spellings; anything unrecognized reads as no alert.
pub(crate) fn preventive_from_raw(raw: &str) -> PreventiveStatus {
    match normalize_token(raw).as_str() {
        "urgent" | "urgente" => PreventiveStatus::Urgent,
        "critical" | "critico" | "crítico" => PreventiveStatus::Critical,
        "attention" | "atencao" | "atenção" => PreventiveStatus::Attention,
        _ => PreventiveStatus::None,
    }
}

/// Map a raw loyalty cell onto a tier; unrecognized values read as none.
pub(crate) fn loyalty_from_raw(raw: &str) -> LoyaltyTier {
    match normalize_token(raw).as_str() {
        "full" | "total" | "fidelizado" => LoyaltyTier::Full,
        "partial" | "parcial" => LoyaltyTier::Partial,
        _ => LoyaltyTier::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_normalization_collapses_noise() {
        assert_eq!(normalize_token("  Alcans\u{feff}  Telecom  "), "alcans telecom");
    }

    #[test]
    fn preventive_accepts_portuguese_spellings() {
        assert_eq!(preventive_from_raw("Urgente"), PreventiveStatus::Urgent);
        assert_eq!(preventive_from_raw("CRÍTICO"), PreventiveStatus::Critical);
        assert_eq!(preventive_from_raw("atencao"), PreventiveStatus::Attention);
    }

    #[test]
    fn unrecognized_cells_fall_back_to_defaults() {
        assert_eq!(preventive_from_raw("escalated!!"), PreventiveStatus::None);
        assert_eq!(loyalty_from_raw("gold"), LoyaltyTier::None);
        assert_eq!(loyalty_from_raw(""), LoyaltyTier::None);
    }

    #[test]
    fn loyalty_accepts_known_spellings() {
        assert_eq!(loyalty_from_raw("Fidelizado"), LoyaltyTier::Full);
        assert_eq!(loyalty_from_raw("parcial"), LoyaltyTier::Partial);
    }
}

use chrono::NaiveDate;

use crate::board::suggestions::{
    ClientProfile, LoyaltyTier, PreventiveStatus, SuggestionId, SuggestionRecord,
};

/// Built-in demo board so the service and CLI work without a configured
/// export. Mirrors the shape of a real ISP customer base: a couple of
/// enterprise accounts, a noisy serial submitter, and one vote tie.
pub(crate) fn sample_suggestions() -> Vec<SuggestionRecord> {
    vec![
        SuggestionRecord {
            id: SuggestionId("s-101".to_string()),
            title: "Self-service plan upgrades in the subscriber app".to_string(),
            votes: 42,
            comments: 17,
            client: ClientProfile {
                company: "Alcans Telecom Ltda".to_string(),
                contact_email: "noc@alcans.example.com".to_string(),
                total_customers: 48_000,
                preventive_status: PreventiveStatus::Critical,
                nps: 7,
                loyalty: LoyaltyTier::Full,
                suggestions_submitted: 12,
                tenure_years: 11,
                account_created_on: created(2017, 3, 10),
            },
        },
        SuggestionRecord {
            id: SuggestionId("s-102".to_string()),
            title: "PIX automatic reconciliation for invoices".to_string(),
            votes: 31,
            comments: 9,
            client: ClientProfile {
                company: "Vetorial Internet".to_string(),
                contact_email: "financeiro@vetorial.example.com".to_string(),
                total_customers: 27_500,
                preventive_status: PreventiveStatus::Urgent,
                nps: 1,
                loyalty: LoyaltyTier::Partial,
                suggestions_submitted: 2,
                tenure_years: 3,
                account_created_on: created(2022, 6, 1),
            },
        },
        SuggestionRecord {
            id: SuggestionId("s-103".to_string()),
            title: "Bulk firmware rollout for ONU fleets".to_string(),
            votes: 57,
            comments: 21,
            client: horizonte_net(),
        },
        SuggestionRecord {
            id: SuggestionId("s-104".to_string()),
            title: "Dark mode for the field technician app".to_string(),
            votes: 12,
            comments: 30,
            client: ClientProfile {
                company: "ConectaSul Provedor".to_string(),
                contact_email: "suporte@conectasul.example.com".to_string(),
                total_customers: 3_100,
                preventive_status: PreventiveStatus::None,
                nps: 10,
                loyalty: LoyaltyTier::Partial,
                suggestions_submitted: 1,
                tenure_years: 1,
                account_created_on: created(2024, 12, 2),
            },
        },
        SuggestionRecord {
            id: SuggestionId("s-105".to_string()),
            title: "Export billing reports as CSV".to_string(),
            votes: 19,
            comments: 5,
            client: ClientProfile {
                company: "Fibramax Telecom".to_string(),
                contact_email: "admin@fibramax.example.com".to_string(),
                total_customers: 14_900,
                preventive_status: PreventiveStatus::Critical,
                nps: 4,
                loyalty: LoyaltyTier::Full,
                suggestions_submitted: 7,
                tenure_years: 8,
                account_created_on: created(2018, 7, 15),
            },
        },
        SuggestionRecord {
            id: SuggestionId("s-106".to_string()),
            title: "Webhook notifications for payment events".to_string(),
            votes: 23,
            comments: 11,
            client: ClientProfile {
                company: "NetVale Internet".to_string(),
                contact_email: "ti@netvale.example.com".to_string(),
                total_customers: 55_000,
                preventive_status: PreventiveStatus::None,
                nps: 2,
                loyalty: LoyaltyTier::None,
                suggestions_submitted: 4,
                tenure_years: 14,
                account_created_on: created(2011, 5, 30),
            },
        },
        SuggestionRecord {
            id: SuggestionId("s-107".to_string()),
            title: "Two-factor login for admin accounts".to_string(),
            votes: 35,
            comments: 13,
            client: ClientProfile {
                company: "Master Cabo Servicos".to_string(),
                contact_email: "seguranca@mastercabo.example.com".to_string(),
                total_customers: 19_800,
                preventive_status: PreventiveStatus::Urgent,
                nps: 0,
                loyalty: LoyaltyTier::Partial,
                suggestions_submitted: 18,
                tenure_years: 4,
                account_created_on: created(2021, 9, 5),
            },
        },
        // Same client and vote count as s-103 so the demo shows the stable
        // tie-break on the board.
        SuggestionRecord {
            id: SuggestionId("s-108".to_string()),
            title: "Customer heat map of outage reports".to_string(),
            votes: 57,
            comments: 2,
            client: horizonte_net(),
        },
    ]
}

fn horizonte_net() -> ClientProfile {
    ClientProfile {
        company: "Horizonte Net".to_string(),
        contact_email: "produto@horizontenet.example.com".to_string(),
        total_customers: 8_200,
        preventive_status: PreventiveStatus::Attention,
        nps: 9,
        loyalty: LoyaltyTier::None,
        suggestions_submitted: 28,
        tenure_years: 6,
        account_created_on: created(2019, 11, 20),
    }
}

fn created(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

use std::io::Read;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use super::normalizer::{loyalty_from_raw, preventive_from_raw};
use super::BoardImportError;
use crate::board::suggestions::{ClientProfile, SuggestionId, SuggestionRecord};

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<SuggestionRecord>, BoardImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<BoardRow>().enumerate() {
        let row = row?;
        // Header occupies line one of the export.
        let line = index + 2;
        match row.into_record() {
            Some(record) => records.push(record),
            None => warn!(line, "skipping board row without a suggestion id"),
        }
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct BoardRow {
    #[serde(rename = "Suggestion ID", default)]
    suggestion_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Votes", default)]
    votes: Option<u32>,
    #[serde(rename = "Comments", default)]
    comments: Option<u32>,
    #[serde(rename = "Company", default)]
    company: String,
    #[serde(rename = "Contact Email", default)]
    contact_email: String,
    #[serde(rename = "Total Customers", default)]
    total_customers: Option<u32>,
    #[serde(rename = "Preventive Status", default)]
    preventive_status: Option<String>,
    #[serde(rename = "NPS", default)]
    nps: Option<u8>,
    #[serde(rename = "Loyalty", default)]
    loyalty: Option<String>,
    #[serde(rename = "Suggestions Submitted", default)]
    suggestions_submitted: Option<u32>,
    #[serde(rename = "Tenure Years", default)]
    tenure_years: Option<u32>,
    #[serde(rename = "Account Created", default)]
    account_created: Option<String>,
}

impl BoardRow {
    fn into_record(self) -> Option<SuggestionRecord> {
        if self.suggestion_id.is_empty() {
            return None;
        }

        let account_created_on = match self.account_created.as_deref().and_then(parse_date) {
            Some(date) => date,
            None => {
                warn!(
                    suggestion = %self.suggestion_id,
                    "unusable account creation date; treating the account as new"
                );
                Local::now().date_naive()
            }
        };

        Some(SuggestionRecord {
            id: SuggestionId(self.suggestion_id),
            title: self.title,
            votes: self.votes.unwrap_or(0),
            comments: self.comments.unwrap_or(0),
            client: ClientProfile {
                company: self.company,
                contact_email: self.contact_email,
                total_customers: self.total_customers.unwrap_or(0),
                preventive_status: preventive_from_raw(
                    self.preventive_status.as_deref().unwrap_or(""),
                ),
                nps: self.nps.unwrap_or(0),
                loyalty: loyalty_from_raw(self.loyalty.as_deref().unwrap_or("")),
                suggestions_submitted: self.suggestions_submitted.unwrap_or(0),
                tenure_years: self.tenure_years.unwrap_or(0),
                account_created_on,
            },
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

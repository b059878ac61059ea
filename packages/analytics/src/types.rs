// ABOUTME: Application record and status types
// ABOUTME: Fixed status order, display titles and the status filter sentinel

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Waiting,
    Rejected,
}

impl ApplicationStatus {
    /// Fixed display order; chart colours are keyed on this position
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Waiting,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Waiting => "waiting",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Waiting => "Waiting",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            ApplicationStatus::Applied => 0,
            ApplicationStatus::Interview => 1,
            ApplicationStatus::Waiting => 2,
            ApplicationStatus::Rejected => 3,
        }
    }

    /// Still waiting on the employer
    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Applied | ApplicationStatus::Waiting)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AnalyticsError::UnknownStatus(s.to_string()))
    }
}

/// A tracked job application. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: u64,
    pub company: String,
    pub position: String,
    pub status: ApplicationStatus,
    /// Date the application was sent
    pub date: NaiveDate,
    pub last_update: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default, rename = "type")]
    pub employment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl ApplicationRecord {
    pub fn new(
        id: u64,
        company: impl Into<String>,
        position: impl Into<String>,
        status: ApplicationStatus,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            company: company.into(),
            position: position.into(),
            status,
            date,
            last_update: date,
            location: String::new(),
            salary: String::new(),
            employment_type: String::new(),
            company_logo: None,
        }
    }

    pub fn with_last_update(mut self, last_update: NaiveDate) -> Self {
        self.last_update = last_update;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// Status selection for filtered views; `All` is the "all" sentinel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<ApplicationStatus> for StatusFilter {
    fn from(status: ApplicationStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("applied", ApplicationStatus::Applied)]
    #[case("Interview", ApplicationStatus::Interview)]
    #[case(" WAITING ", ApplicationStatus::Waiting)]
    #[case("rejected", ApplicationStatus::Rejected)]
    fn test_status_parse_is_case_insensitive(
        #[case] input: &str,
        #[case] expected: ApplicationStatus,
    ) {
        assert_eq!(input.parse::<ApplicationStatus>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_status() {
        assert_eq!(
            "offer".parse::<ApplicationStatus>(),
            Err(AnalyticsError::UnknownStatus("offer".to_string()))
        );
    }

    #[test]
    fn test_fixed_order_and_titles() {
        let titles: Vec<&str> = ApplicationStatus::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Applied", "Interview", "Waiting", "Rejected"]);
        for (i, status) in ApplicationStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "waiting".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ApplicationStatus::Waiting)
        );
        assert!("everything".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::default().to_string(), "all");
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "id": 2,
            "company": "Microsoft",
            "position": "Full Stack Developer",
            "status": "interview",
            "date": "2024-03-25",
            "lastUpdate": "2024-03-27",
            "type": "Full-time"
        }))
        .unwrap();

        assert_eq!(record.status, ApplicationStatus::Interview);
        assert_eq!(record.last_update, NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
        assert_eq!(record.employment_type, "Full-time");
        assert_eq!(record.location, "");
        assert!(record.company_logo.is_none());
    }
}

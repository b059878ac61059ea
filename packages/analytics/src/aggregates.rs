// ABOUTME: Pure aggregate functions over application records
// ABOUTME: Status counts, search and status filtering, board columns, sorting and chart series

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AnalyticsError;
use crate::types::{ApplicationRecord, ApplicationStatus, StatusFilter};

/// Number of records per status; every status is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: usize,
    pub interview: usize,
    pub waiting: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Waiting => self.waiting,
            ApplicationStatus::Rejected => self.rejected,
        }
    }

    fn increment(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Interview => self.interview += 1,
            ApplicationStatus::Waiting => self.waiting += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.interview + self.waiting + self.rejected
    }

    /// Counts in `ApplicationStatus::ALL` order
    pub fn as_array(&self) -> [usize; 4] {
        ApplicationStatus::ALL.map(|status| self.get(status))
    }
}

pub fn count_by_status(records: &[ApplicationRecord]) -> StatusCounts {
    records.iter().fold(StatusCounts::default(), |mut counts, record| {
        counts.increment(record.status);
        counts
    })
}

/// True when the record passes both the status filter and the search text.
///
/// Search is a case-insensitive substring match on company, position or
/// location; only empty search text matches everything.
pub fn matches_query(record: &ApplicationRecord, search: &str, status: StatusFilter) -> bool {
    if !status.matches(record.status) {
        return false;
    }

    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    [&record.company, &record.position, &record.location]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Matching records in input order
pub fn filter_applications<'a>(
    records: &'a [ApplicationRecord],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a ApplicationRecord> {
    records
        .iter()
        .filter(|record| matches_query(record, search, status))
        .collect()
}

/// One point per status, always in `ApplicationStatus::ALL` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub value: usize,
}

pub fn chart_series(records: &[ApplicationRecord]) -> Vec<ChartPoint> {
    let counts = count_by_status(records);
    ApplicationStatus::ALL
        .iter()
        .map(|&status| ChartPoint {
            status,
            label: status.title(),
            value: counts.get(status),
        })
        .collect()
}

/// A board column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn<'a> {
    pub status: ApplicationStatus,
    pub title: &'static str,
    pub applications: Vec<&'a ApplicationRecord>,
}

/// Board columns in the fixed status order, each keeping input order
pub fn group_by_status(records: &[ApplicationRecord]) -> Vec<StatusColumn<'_>> {
    let mut columns: Vec<StatusColumn<'_>> = ApplicationStatus::ALL
        .iter()
        .map(|&status| StatusColumn {
            status,
            title: status.title(),
            applications: Vec::new(),
        })
        .collect();

    for record in records {
        columns[record.status.index()].applications.push(record);
    }
    columns
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    AppliedDate,
    LastUpdate,
    Company,
    Status,
}

impl FromStr for SortKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "applied" | "applied_date" => Ok(SortKey::AppliedDate),
            "lastupdate" | "last_update" | "updated" => Ok(SortKey::LastUpdate),
            "company" => Ok(SortKey::Company),
            "status" => Ok(SortKey::Status),
            _ => Err(AnalyticsError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(AnalyticsError::UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

fn compare(a: &ApplicationRecord, b: &ApplicationRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::AppliedDate => a.date.cmp(&b.date),
        SortKey::LastUpdate => a.last_update.cmp(&b.last_update),
        SortKey::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
        SortKey::Status => a.status.index().cmp(&b.status.index()),
    }
}

/// Stable sort; records comparing equal keep their relative order
pub fn sort_applications(records: &mut [&ApplicationRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Everything a list view needs to select and order records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: Option<SortSpec>,
}

impl ApplicationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(key, order));
        self
    }
}

/// Filter, then sort when the query asks for it
pub fn view<'a>(records: &'a [ApplicationRecord], query: &ApplicationQuery) -> Vec<&'a ApplicationRecord> {
    let mut selected = filter_applications(records, &query.search, query.status);
    if let Some(spec) = query.sort {
        sort_applications(&mut selected, spec.key, spec.order);
    }
    selected
}

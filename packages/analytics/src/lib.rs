// ABOUTME: Derived aggregates over job application records
// ABOUTME: Status counts, filtered and sorted views, chart series and weekly reports

pub mod aggregates;
pub mod error;
pub mod report;
pub mod types;

// Re-export main types
pub use aggregates::{
    chart_series, count_by_status, filter_applications, group_by_status, matches_query,
    sort_applications, view, ApplicationQuery, ChartPoint, SortKey, SortOrder, SortSpec,
    StatusColumn, StatusCounts,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use report::{
    action_items, weekly_report, ActionItem, ActionKind, ChangeType, Priority, ReportMetric,
    ReportOptions, ReportPeriod, ReportStat, WeeklyReport,
};
pub use types::{ApplicationRecord, ApplicationStatus, StatusFilter};

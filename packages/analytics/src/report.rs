// ABOUTME: Weekly report over application records
// ABOUTME: Period-over-period statistics and follow-up / interview action items

use chrono::{Duration, NaiveDate};
use jobtrack_settings::UserSettings;
use serde::Serialize;
use tracing::debug;

use crate::types::{ApplicationRecord, ApplicationStatus};

pub const REPORT_PERIOD_DAYS: i64 = 7;
pub const INTERVIEW_PREP_DAYS: i64 = 3;

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// The seven days ending on `end`
    pub fn week_ending(end: NaiveDate) -> Self {
        Self {
            start: days_before(end, REPORT_PERIOD_DAYS - 1),
            end,
        }
    }

    /// The period of the same length immediately before this one.
    /// Both bounds clamp at `NaiveDate::MIN`.
    pub fn previous(&self) -> Self {
        let length = (self.end - self.start).num_days() + 1;
        Self {
            start: days_before(self.start, length),
            end: days_before(self.start, 1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportMetric {
    TotalApplications,
    PendingResponses,
    InterviewsScheduled,
    Rejections,
}

impl ReportMetric {
    pub const ALL: [ReportMetric; 4] = [
        ReportMetric::TotalApplications,
        ReportMetric::PendingResponses,
        ReportMetric::InterviewsScheduled,
        ReportMetric::Rejections,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportMetric::TotalApplications => "Total Applications",
            ReportMetric::PendingResponses => "Pending Responses",
            ReportMetric::InterviewsScheduled => "Interviews Scheduled",
            ReportMetric::Rejections => "Rejections",
        }
    }

    /// A decrease is the good direction
    pub fn is_inverse(&self) -> bool {
        matches!(self, ReportMetric::PendingResponses | ReportMetric::Rejections)
    }

    fn counts(&self, record: &ApplicationRecord, period: &ReportPeriod) -> bool {
        match self {
            ReportMetric::TotalApplications => period.contains(record.date),
            ReportMetric::PendingResponses => {
                record.status.is_pending() && period.contains(record.last_update)
            }
            ReportMetric::InterviewsScheduled => {
                record.status == ApplicationStatus::Interview && period.contains(record.last_update)
            }
            ReportMetric::Rejections => {
                record.status == ApplicationStatus::Rejected && period.contains(record.last_update)
            }
        }
    }

    fn count(&self, records: &[ApplicationRecord], period: &ReportPeriod) -> usize {
        records.iter().filter(|r| self.counts(r, period)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStat {
    pub metric: ReportMetric,
    pub title: &'static str,
    pub value: usize,
    pub previous: usize,
    pub change: i64,
    pub change_type: ChangeType,
    /// Whether the change went the good way for this metric
    pub favorable: bool,
}

impl ReportStat {
    fn new(metric: ReportMetric, value: usize, previous: usize) -> Self {
        let change = value as i64 - previous as i64;
        let change_type = match change {
            c if c > 0 => ChangeType::Increase,
            c if c < 0 => ChangeType::Decrease,
            _ => ChangeType::Unchanged,
        };
        let favorable = match change_type {
            ChangeType::Increase => !metric.is_inverse(),
            ChangeType::Decrease => metric.is_inverse(),
            ChangeType::Unchanged => false,
        };

        Self {
            metric,
            title: metric.title(),
            value,
            previous,
            change,
            change_type,
            favorable,
        }
    }

    /// Signed change as shown on a stat card, e.g. "+4", "-2", "0"
    pub fn change_label(&self) -> String {
        if self.change > 0 {
            format!("+{}", self.change)
        } else {
            self.change.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    FollowUp,
    InterviewPrep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub kind: ActionKind,
    pub application_id: u64,
    pub company: String,
    pub title: String,
    pub due: NaiveDate,
    pub priority: Priority,
}

/// Knobs taken from the user's job-search and notification settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub follow_up_days: u32,
    pub follow_up_reminders: bool,
    pub interview_reminders: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&UserSettings::default())
    }
}

impl From<&UserSettings> for ReportOptions {
    fn from(settings: &UserSettings) -> Self {
        Self {
            follow_up_days: settings.job_search.follow_up_days,
            follow_up_reminders: settings.notifications.follow_up_reminders,
            interview_reminders: settings.notifications.interview_reminders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub period: ReportPeriod,
    pub stats: Vec<ReportStat>,
    pub action_items: Vec<ActionItem>,
}

impl WeeklyReport {
    pub fn stat(&self, metric: ReportMetric) -> Option<&ReportStat> {
        self.stats.iter().find(|s| s.metric == metric)
    }
}

/// Report for the week ending on `end`, compared with the week before
pub fn weekly_report(
    records: &[ApplicationRecord],
    end: NaiveDate,
    options: &ReportOptions,
) -> WeeklyReport {
    let period = ReportPeriod::week_ending(end);
    let previous = period.previous();

    let stats = ReportMetric::ALL
        .iter()
        .map(|metric| {
            ReportStat::new(
                *metric,
                metric.count(records, &period),
                metric.count(records, &previous),
            )
        })
        .collect();

    let action_items = action_items(records, end, options);
    debug!(
        "Weekly report {}..{}: {} records, {} action items",
        period.start,
        period.end,
        records.len(),
        action_items.len()
    );

    WeeklyReport {
        period,
        stats,
        action_items,
    }
}

/// Follow-up and interview-prep reminders as of `today`, soonest first
pub fn action_items(
    records: &[ApplicationRecord],
    today: NaiveDate,
    options: &ReportOptions,
) -> Vec<ActionItem> {
    let interval = i64::from(options.follow_up_days.max(1));
    let mut items = Vec::new();

    for record in records {
        match record.status {
            ApplicationStatus::Applied | ApplicationStatus::Waiting
                if options.follow_up_reminders =>
            {
                let idle = (today - record.last_update).num_days();
                let due = record.last_update.checked_add_signed(Duration::days(interval));
                if let Some(due) = due.filter(|_| idle >= interval) {
                    items.push(ActionItem {
                        kind: ActionKind::FollowUp,
                        application_id: record.id,
                        company: record.company.clone(),
                        title: format!("Follow up with {}", record.company),
                        due,
                        priority: if idle >= interval * 2 {
                            Priority::High
                        } else {
                            Priority::Medium
                        },
                    });
                }
            }
            ApplicationStatus::Interview if options.interview_reminders => {
                let due = record
                    .last_update
                    .checked_add_signed(Duration::days(INTERVIEW_PREP_DAYS));
                // Only upcoming interviews
                if let Some(due) = due.filter(|due| *due >= today) {
                    items.push(ActionItem {
                        kind: ActionKind::InterviewPrep,
                        application_id: record.id,
                        company: record.company.clone(),
                        title: format!("Prepare for {} interview", record.company),
                        due,
                        priority: Priority::High,
                    });
                }
            }
            _ => {}
        }
    }

    items.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.company.cmp(&b.company)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn record(id: u64, company: &str, status: ApplicationStatus, applied: NaiveDate, updated: NaiveDate) -> ApplicationRecord {
        ApplicationRecord::new(id, company, "Engineer", status, applied).with_last_update(updated)
    }

    #[test]
    fn test_periods() {
        let period = ReportPeriod::week_ending(date(3, 31));
        assert_eq!(period.start, date(3, 25));
        assert!(period.contains(date(3, 25)));
        assert!(period.contains(date(3, 31)));
        assert!(!period.contains(date(4, 1)));

        let previous = period.previous();
        assert_eq!(previous.start, date(3, 18));
        assert_eq!(previous.end, date(3, 24));
    }

    #[test]
    fn test_weekly_stats_compare_with_previous_week() {
        use ApplicationStatus::*;
        let records = vec![
            record(1, "Google", Applied, date(3, 28), date(3, 28)),
            record(2, "Microsoft", Interview, date(3, 20), date(3, 27)),
            record(3, "Amazon", Waiting, date(3, 20), date(3, 23)),
            record(4, "Meta", Rejected, date(3, 15), date(3, 18)),
            record(5, "Shopify", Applied, date(3, 19), date(3, 19)),
            record(6, "Stripe", Applied, date(3, 26), date(3, 26)),
        ];

        let report = weekly_report(&records, date(3, 31), &ReportOptions::default());

        let total = report.stat(ReportMetric::TotalApplications).unwrap();
        assert_eq!((total.value, total.previous), (2, 3));
        assert_eq!(total.change_label(), "-1");
        assert_eq!(total.change_type, ChangeType::Decrease);
        assert!(!total.favorable);

        let pending = report.stat(ReportMetric::PendingResponses).unwrap();
        assert_eq!((pending.value, pending.previous), (2, 2));
        assert_eq!(pending.change_type, ChangeType::Unchanged);
        assert_eq!(pending.change_label(), "0");

        let interviews = report.stat(ReportMetric::InterviewsScheduled).unwrap();
        assert_eq!(interviews.change_label(), "+1");
        assert!(interviews.favorable);

        let rejections = report.stat(ReportMetric::Rejections).unwrap();
        assert_eq!((rejections.value, rejections.previous), (0, 1));
        assert_eq!(rejections.change_type, ChangeType::Decrease);
        assert!(rejections.favorable);

        let titles: Vec<&str> = report.stats.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Total Applications", "Pending Responses", "Interviews Scheduled", "Rejections"]
        );
    }

    #[test]
    fn test_follow_up_priorities() {
        use ApplicationStatus::*;
        let records = vec![
            record(1, "Fresh", Applied, date(3, 25), date(3, 25)),
            record(2, "Due", Waiting, date(3, 1), date(3, 17)),
            record(3, "Overdue", Applied, date(2, 1), date(3, 1)),
            record(4, "Closed", Rejected, date(2, 1), date(2, 2)),
        ];

        let items = action_items(&records, date(3, 31), &ReportOptions::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].company, "Overdue");
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].due, date(3, 15));
        assert_eq!(items[1].title, "Follow up with Due");
        assert_eq!(items[1].priority, Priority::Medium);
        assert_eq!(items[1].due, date(3, 31));
    }

    #[test]
    fn test_interview_prep_items() {
        use ApplicationStatus::*;
        let records = vec![
            record(1, "McKinsey", Interview, date(3, 20), date(3, 30)),
            record(2, "Past", Interview, date(3, 1), date(3, 10)),
        ];

        let items = action_items(&records, date(3, 31), &ReportOptions::default());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ActionKind::InterviewPrep);
        assert_eq!(items[0].title, "Prepare for McKinsey interview");
        assert_eq!(items[0].due, date(4, 2));
        assert_eq!(items[0].priority, Priority::High);
    }

    #[test]
    fn test_dates_at_calendar_bounds() {
        let records = vec![
            record(1, "Late", ApplicationStatus::Interview, NaiveDate::MAX, NaiveDate::MAX),
            record(2, "Early", ApplicationStatus::Applied, NaiveDate::MIN, NaiveDate::MIN),
        ];

        let items = action_items(&records, NaiveDate::MAX, &ReportOptions::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].company, "Early");

        let report = weekly_report(&records, NaiveDate::MIN, &ReportOptions::default());
        assert_eq!(report.period.start, NaiveDate::MIN);
        assert_eq!(report.period.previous().end, NaiveDate::MIN);
    }

    #[test]
    fn test_reminder_flags_gate_items() {
        use ApplicationStatus::*;
        let records = vec![
            record(1, "Overdue", Applied, date(2, 1), date(3, 1)),
            record(2, "McKinsey", Interview, date(3, 20), date(3, 30)),
        ];
        let mut settings = UserSettings::default();
        settings.notifications.follow_up_reminders = false;

        let options = ReportOptions::from(&settings);
        let items = action_items(&records, date(3, 31), &options);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ActionKind::InterviewPrep);

        settings.notifications.interview_reminders = false;
        let options = ReportOptions::from(&settings);
        assert!(action_items(&records, date(3, 31), &options).is_empty());
    }

    #[test]
    fn test_follow_up_interval_from_settings() {
        let mut settings = UserSettings::default();
        settings.job_search.follow_up_days = 3;
        let records = vec![record(1, "Quick", ApplicationStatus::Applied, date(3, 27), date(3, 27))];

        let items = action_items(&records, date(3, 31), &ReportOptions::from(&settings));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].due, date(3, 30));
        assert_eq!(items[0].priority, Priority::Medium);
    }
}

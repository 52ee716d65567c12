//! Dashboard aggregation.
//!
//! Nothing here is stored: each call rescans the full requirement and
//! customer collections.

pub mod model;

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeZone, Utc};
use tracing::debug;

use crate::error::CoreResult;
use crate::requirement::model::{
    Priority, ProductModule, Requirement, RequirementStatus, SourceCategory,
};
use crate::workspace::Workspace;
use model::{Breakdown, CountEntry, DashboardSummary};

const TOP_CUSTOMERS: usize = 5;

/// Dashboard counts, with "this month" taken in the local timezone.
pub async fn get_summary(ws: &Workspace) -> CoreResult<DashboardSummary> {
    get_summary_at(ws, Local::now()).await
}

/// Dashboard counts relative to `now`; the month boundary is computed in
/// `now`'s timezone.
pub async fn get_summary_at<Tz: TimeZone>(
    ws: &Workspace,
    now: DateTime<Tz>,
) -> CoreResult<DashboardSummary> {
    let requirements = ws.requirements.load().await?;
    let customers = ws.customers.load().await?;
    let summary = summarize(&requirements, customers.len(), month_start(&now));
    debug!(?summary, "Computed dashboard summary");
    Ok(summary)
}

/// Requirement counts grouped by status, module, priority, source category
/// and customer.
pub async fn get_breakdown(ws: &Workspace) -> CoreResult<Breakdown> {
    let requirements = ws.requirements.load().await?;
    Ok(breakdown(&requirements))
}

fn summarize(
    requirements: &[Requirement],
    total_customers: usize,
    month_start: DateTime<Utc>,
) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_requirements: requirements.len(),
        total_customers,
        ..Default::default()
    };

    for r in requirements {
        if r.status == RequirementStatus::PendingReview {
            summary.pending_review += 1;
        }
        if r.is_in_progress() {
            summary.in_progress += 1;
        }
        if r.status == RequirementStatus::Released && r.completed_at() >= month_start {
            summary.completed_this_month += 1;
        }
    }
    summary
}

/// Midnight on the first day of `now`'s month, in `now`'s timezone.
fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let today = now.date_naive();
    let first_day = today.with_day(1).unwrap_or(today);
    let midnight = first_day.and_time(NaiveTime::MIN);
    let tz = now.timezone();

    // A DST gap can swallow local midnight; fall back to reading it as UTC.
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

fn breakdown(requirements: &[Requirement]) -> Breakdown {
    let by_status = RequirementStatus::ALL
        .iter()
        .map(|s| CountEntry::new(s.as_str(), requirements.iter().filter(|r| r.status == *s).count()))
        .filter(|e| e.count > 0)
        .collect();

    let by_module = ProductModule::ALL
        .iter()
        .map(|m| CountEntry::new(m.as_str(), requirements.iter().filter(|r| r.module == *m).count()))
        .filter(|e| e.count > 0)
        .collect();

    let by_priority = Priority::ALL
        .iter()
        .map(|p| CountEntry::new(p.as_str(), requirements.iter().filter(|r| r.priority == *p).count()))
        .collect();

    let by_source_category = SourceCategory::ALL
        .iter()
        .map(|c| {
            CountEntry::new(
                c.as_str(),
                requirements.iter().filter(|r| r.source.category == *c).count(),
            )
        })
        .filter(|e| e.count > 0)
        .collect();

    Breakdown {
        by_status,
        by_module,
        by_priority,
        by_source_category,
        top_customers: top_customers(requirements, TOP_CUSTOMERS),
    }
}

fn top_customers(requirements: &[Requirement], limit: usize) -> Vec<CountEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in requirements {
        let name = r.customer_name.as_str();
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let mut entries: Vec<CountEntry> = order
        .into_iter()
        .map(|name| CountEntry::new(name, counts[name]))
        .collect();
    // Stable: equal counts keep first-appearance order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

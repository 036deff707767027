//! Days-outstanding views: collection velocity over completed deals and
//! ageing/health over active ones.

use crate::analytics::{days_outstanding, group_by_month, percent, round_to, sum_of};
use crate::model::{columns, status, Record, Snapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive day ranges; `None` upper bound is open-ended.
const VELOCITY_BUCKETS: &[(&str, i64, Option<i64>)] = &[
    ("0-30", 0, Some(30)),
    ("31-60", 31, Some(60)),
    ("61-90", 61, Some(90)),
    ("91-120", 91, Some(120)),
    ("121-180", 121, Some(180)),
    ("181+", 181, None),
];

const AGEING_BUCKETS: &[(&str, i64, Option<i64>)] = &[
    ("0-30", 0, Some(30)),
    ("31-60", 31, Some(60)),
    ("61-90", 61, Some(90)),
    ("91-120", 91, Some(120)),
    ("121-180", 121, Some(180)),
    ("181-365", 181, Some(365)),
    ("365+", 366, None),
];

fn in_bucket(days: i64, lo: i64, hi: Option<i64>) -> bool {
    days >= lo && hi.map_or(true, |h| days <= h)
}

/// Records whose days outstanding fall in `[lo, hi]`.
fn bucket_members<'a>(
    aged: &[(&'a Record, Option<i64>)],
    lo: i64,
    hi: Option<i64>,
) -> Vec<&'a Record> {
    aged.iter()
        .filter(|(_, days)| days.is_some_and(|d| in_bucket(d, lo, hi)))
        .map(|(r, _)| *r)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityBucket {
    pub bucket: String,
    pub deal_count: usize,
    pub collected: f64,
    pub purchase_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityMonth {
    pub month: String,
    pub collected: f64,
    pub purchase_value: f64,
    pub denied: f64,
    pub pending: f64,
    pub collection_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionVelocity {
    pub buckets: Vec<VelocityBucket>,
    pub monthly: Vec<VelocityMonth>,
}

/// Completed deals bucketed by days since origination, plus monthly
/// collection rates over the whole book.
pub fn compute_collection_velocity(
    snapshot: &Snapshot,
    mult: f64,
    as_of: NaiveDate,
) -> CollectionVelocity {
    let completed: Vec<(&Record, Option<i64>)> = snapshot
        .records()
        .iter()
        .filter(|r| r.text_eq(columns::STATUS, status::COMPLETED))
        .map(|r| (r, days_outstanding(r, as_of)))
        .collect();

    let buckets = VELOCITY_BUCKETS
        .iter()
        .map(|(label, lo, hi)| {
            let members = bucket_members(&completed, *lo, *hi);
            VelocityBucket {
                bucket: (*label).to_string(),
                deal_count: members.len(),
                collected: sum_of(&members, columns::COLLECTED) * mult,
                purchase_value: sum_of(&members, columns::PURCHASE_VALUE) * mult,
            }
        })
        .collect();

    let monthly = group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            VelocityMonth {
                month,
                collected,
                purchase_value,
                denied: sum_of(&records, columns::DENIED) * mult,
                pending: sum_of(&records, columns::PENDING) * mult,
                collection_rate: round_to(percent(collected, purchase_value), 1),
            }
        })
        .collect();

    CollectionVelocity { buckets, monthly }
}

/// Health of an active deal by days outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    Healthy,
    Watch,
    Delayed,
    Poor,
    Unknown,
}

impl Health {
    /// Classes reported in the health summary, best first.
    pub const RANKED: [Health; 4] = [Health::Healthy, Health::Watch, Health::Delayed, Health::Poor];

    pub fn color(self) -> &'static str {
        match self {
            Health::Healthy => "#4ADE80",
            Health::Watch => "#F59E0B",
            Health::Delayed => "#F97316",
            Health::Poor => "#EF4444",
            Health::Unknown => "#9CA3AF",
        }
    }
}

pub fn classify_health(days: Option<i64>) -> Health {
    match days {
        None => Health::Unknown,
        Some(d) if d <= 60 => Health::Healthy,
        Some(d) if d <= 90 => Health::Watch,
        Some(d) if d <= 120 => Health::Delayed,
        Some(_) => Health::Poor,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeingBucket {
    pub bucket: String,
    pub deal_count: usize,
    pub pending_value: f64,
    pub purchase_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub status: Health,
    pub deal_count: usize,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMonth {
    pub month: String,
    pub deal_count: usize,
    pub purchase_value: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ageing {
    pub ageing_buckets: Vec<AgeingBucket>,
    pub health_summary: Vec<HealthSummary>,
    pub monthly_active: Vec<ActiveMonth>,
    pub total_active_deals: usize,
    pub total_active_value: f64,
}

/// Ageing buckets and health breakdown of active (`Executed`) deals.
pub fn compute_ageing(snapshot: &Snapshot, mult: f64, as_of: NaiveDate) -> Ageing {
    let active: Vec<(&Record, Option<i64>)> = snapshot
        .records()
        .iter()
        .filter(|r| r.text_eq(columns::STATUS, status::EXECUTED))
        .map(|r| (r, days_outstanding(r, as_of)))
        .collect();
    let active_records: Vec<&Record> = active.iter().map(|(r, _)| *r).collect();

    let ageing_buckets = AGEING_BUCKETS
        .iter()
        .map(|(label, lo, hi)| {
            let members = bucket_members(&active, *lo, *hi);
            AgeingBucket {
                bucket: (*label).to_string(),
                deal_count: members.len(),
                pending_value: sum_of(&members, columns::PENDING) * mult,
                purchase_value: sum_of(&members, columns::PURCHASE_VALUE) * mult,
            }
        })
        .collect();

    let health_summary = Health::RANKED
        .iter()
        .map(|health| {
            let members: Vec<&Record> = active
                .iter()
                .filter(|(_, days)| classify_health(*days) == *health)
                .map(|(r, _)| *r)
                .collect();
            HealthSummary {
                status: *health,
                deal_count: members.len(),
                value: sum_of(&members, columns::PURCHASE_VALUE) * mult,
                percentage: round_to(percent(members.len() as f64, active.len() as f64), 1),
                color: health.color().to_string(),
            }
        })
        .collect();

    let monthly_active = group_by_month(active_records.iter().copied())
        .into_iter()
        .map(|(month, records)| ActiveMonth {
            month,
            deal_count: crate::analytics::count_of(&records, columns::PURCHASE_VALUE),
            purchase_value: sum_of(&records, columns::PURCHASE_VALUE) * mult,
            pending: sum_of(&records, columns::PENDING) * mult,
        })
        .collect();

    Ageing {
        ageing_buckets,
        health_summary,
        monthly_active,
        total_active_deals: active.len(),
        total_active_value: sum_of(&active_records, columns::PURCHASE_VALUE) * mult,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_health_boundaries() {
        assert_eq!(classify_health(Some(0)), Health::Healthy);
        assert_eq!(classify_health(Some(60)), Health::Healthy);
        assert_eq!(classify_health(Some(61)), Health::Watch);
        assert_eq!(classify_health(Some(90)), Health::Watch);
        assert_eq!(classify_health(Some(120)), Health::Delayed);
        assert_eq!(classify_health(Some(121)), Health::Poor);
        assert_eq!(classify_health(None), Health::Unknown);
    }

    #[test]
    fn test_buckets_are_inclusive_and_open_ended() {
        assert!(in_bucket(30, 0, Some(30)));
        assert!(!in_bucket(31, 0, Some(30)));
        assert!(in_bucket(10_000, 366, None));
        assert!(!in_bucket(-1, 0, Some(30)));
    }
}

//! Concentration by group, product and discount, plus the largest deals.

use crate::analytics::{count_of, group_by_text, percent, round_to, sum_of};
use crate::model::{columns, Record, Snapshot, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TOP_GROUPS: usize = 15;
const TOP_DEALS: usize = 10;

/// Fields copied into the top-deal listing when present.
const TOP_DEAL_COLUMNS: &[&str] = &[
    columns::DEAL_DATE,
    columns::STATUS,
    columns::PURCHASE_VALUE,
    columns::DISCOUNT,
    columns::COLLECTED,
    columns::DENIED,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub group: String,
    pub purchase_value: f64,
    pub deal_count: usize,
    pub collected: f64,
    pub denied: f64,
    pub collection_rate: f64,
    pub denial_rate: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductShare {
    pub product: String,
    pub purchase_value: f64,
    pub deal_count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountShare {
    pub discount: f64,
    pub deal_count: usize,
    pub purchase_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<GroupShare>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Vec<ProductShare>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Vec<DiscountShare>>,
    pub top_deals: Vec<BTreeMap<String, Value>>,
}

fn by_value_desc<T, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

fn group_shares(snapshot: &Snapshot, mult: f64, total: f64) -> Vec<GroupShare> {
    let mut rows: Vec<GroupShare> = group_by_text(snapshot.records(), columns::GROUP)
        .into_iter()
        .map(|(group, records)| {
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            let denied = sum_of(&records, columns::DENIED) * mult;
            GroupShare {
                group,
                purchase_value,
                deal_count: count_of(&records, columns::PURCHASE_VALUE),
                collected,
                denied,
                collection_rate: round_to(percent(collected, purchase_value), 1),
                denial_rate: round_to(percent(denied, purchase_value), 1),
                percentage: round_to(percent(purchase_value, total), 1),
            }
        })
        .collect();
    by_value_desc(&mut rows, |g| g.purchase_value);
    rows.truncate(TOP_GROUPS);
    rows
}

fn product_shares(snapshot: &Snapshot, mult: f64, total: f64) -> Vec<ProductShare> {
    let mut rows: Vec<ProductShare> = group_by_text(snapshot.records(), columns::PRODUCT)
        .into_iter()
        .map(|(product, records)| {
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            ProductShare {
                product,
                purchase_value,
                deal_count: count_of(&records, columns::PURCHASE_VALUE),
                percentage: round_to(percent(purchase_value, total), 1),
            }
        })
        .collect();
    by_value_desc(&mut rows, |p| p.purchase_value);
    rows
}

/// Discount levels ascending; non-numeric discounts are dropped.
fn discount_shares(snapshot: &Snapshot, mult: f64) -> Vec<DiscountShare> {
    let mut levels: Vec<(f64, Vec<&Record>)> = Vec::new();
    for record in snapshot.records() {
        let Some(discount) = record.number(columns::DISCOUNT) else {
            continue;
        };
        match levels.iter_mut().find(|(d, _)| *d == discount) {
            Some((_, members)) => members.push(record),
            None => levels.push((discount, vec![record])),
        }
    }
    levels.sort_by(|a, b| a.0.total_cmp(&b.0));
    levels
        .into_iter()
        .map(|(discount, records)| DiscountShare {
            discount,
            deal_count: count_of(&records, columns::PURCHASE_VALUE),
            purchase_value: sum_of(&records, columns::PURCHASE_VALUE) * mult,
        })
        .collect()
}

fn top_deals(snapshot: &Snapshot, mult: f64) -> Vec<BTreeMap<String, Value>> {
    let mut priced: Vec<(&Record, f64)> = snapshot
        .records()
        .iter()
        .filter_map(|r| r.number(columns::PURCHASE_VALUE).map(|pv| (r, pv)))
        .collect();
    // stable sort keeps file order among equal values
    priced.sort_by(|a, b| b.1.total_cmp(&a.1));

    let present: Vec<&str> = TOP_DEAL_COLUMNS
        .iter()
        .copied()
        .filter(|c| snapshot.has_column(c))
        .collect();

    priced
        .into_iter()
        .take(TOP_DEALS)
        .map(|(record, _)| {
            present
                .iter()
                .map(|column| {
                    let value = record.get_field(column).cloned().unwrap_or(Value::Empty);
                    let value = match value {
                        Value::Number(n)
                            if *column == columns::PURCHASE_VALUE
                                || *column == columns::COLLECTED =>
                        {
                            Value::Number(n * mult)
                        }
                        other => other,
                    };
                    ((*column).to_string(), value)
                })
                .collect()
        })
        .collect()
}

pub fn compute_concentration(snapshot: &Snapshot, mult: f64) -> Concentration {
    let total = snapshot.sum_or_zero(columns::PURCHASE_VALUE) * mult;
    Concentration {
        group: snapshot
            .has_column(columns::GROUP)
            .then(|| group_shares(snapshot, mult, total)),
        product: snapshot
            .has_column(columns::PRODUCT)
            .then(|| product_shares(snapshot, mult, total)),
        discount: snapshot
            .has_column(columns::DISCOUNT)
            .then(|| discount_shares(snapshot, mult)),
        top_deals: top_deals(snapshot, mult),
    }
}

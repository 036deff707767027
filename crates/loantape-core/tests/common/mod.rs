use loantape_core::{Record, Snapshot};

#[allow(dead_code)]
pub const TAPE_COLUMNS: &[&str] = &[
    "ID",
    "Status",
    "Purchase value",
    "Collected till date",
    "Denied by insurance",
];

/// One deal row with the standard tape columns
#[allow(dead_code)]
pub fn deal(id: &str, status: &str, purchase: f64, collected: f64, denied: f64) -> Record {
    Record::new()
        .with("ID", id)
        .with("Status", status)
        .with("Purchase value", purchase)
        .with("Collected till date", collected)
        .with("Denied by insurance", denied)
}

/// Build a snapshot over the given columns
#[allow(dead_code)]
pub fn snapshot(label: &str, columns: &[&str], records: Vec<Record>) -> Snapshot {
    Snapshot::new(
        label,
        columns.iter().map(|c| c.to_string()).collect(),
        records,
    )
}

/// Build a snapshot over the standard tape columns
#[allow(dead_code)]
pub fn tape(label: &str, records: Vec<Record>) -> Snapshot {
    snapshot(label, TAPE_COLUMNS, records)
}

/// Three deals: one completed, two executed; collection rate 30%, denial 0%
#[allow(dead_code)]
pub fn base_deals() -> Vec<Record> {
    vec![
        deal("1", "Completed", 100.0, 100.0, 0.0),
        deal("2", "Executed", 200.0, 50.0, 0.0),
        deal("3", "Executed", 200.0, 0.0, 0.0),
    ]
}

//! Tabular snapshot model
//!
//! A [`Snapshot`] is an ordered, read-only collection of [`Record`]s with a
//! declared column set. Field access is by column name and always optional.

pub mod record;
pub mod snapshot;
pub mod value;

pub use record::Record;
pub use snapshot::Snapshot;
pub use value::Value;

/// Column names the engine and the analytics module read.
pub mod columns {
    pub const STATUS: &str = "Status";
    pub const DEAL_DATE: &str = "Deal date";
    pub const PURCHASE_VALUE: &str = "Purchase value";
    pub const PURCHASE_PRICE: &str = "Purchase price";
    pub const GROSS_REVENUE: &str = "Gross revenue";
    pub const COLLECTED: &str = "Collected till date";
    pub const DENIED: &str = "Denied by insurance";
    pub const PENDING: &str = "Pending insurance response";
    pub const PAID_BY_INSURANCE: &str = "Paid by insurance";
    pub const NEW_BUSINESS: &str = "New business";
    pub const EXPECTED_TOTAL: &str = "Expected total";
    pub const EXPECTED_IRR: &str = "Expected IRR";
    pub const ACTUAL_IRR: &str = "Actual IRR";
    pub const SETUP_FEE: &str = "Setup fee";
    pub const OTHER_FEE: &str = "Other fee";
    pub const GROUP: &str = "Group";
    pub const PRODUCT: &str = "Product";
    pub const DISCOUNT: &str = "Discount";
}

/// Status values with defined meaning.
pub mod status {
    /// Terminal state; financial fields must not change afterwards.
    pub const COMPLETED: &str = "Completed";
    /// Funded and awaiting collection.
    pub const EXECUTED: &str = "Executed";
}

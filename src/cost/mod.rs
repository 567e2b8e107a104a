pub mod rates;
pub mod totals;

pub use rates::{RateTable, ResourceKind, HOURS_PER_MONTH};
pub use totals::CostTotals;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One persisted TVL computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvlRecord {
    pub id: i64,
    pub value: Decimal,
    pub computed_at: DateTime<Utc>,
}

//! Row shapes produced by the chart queries over `site_rollout`.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Sites brought on air per calendar month.
#[derive(Debug, Serialize, FromRow)]
pub struct MonthlyActivationRow {
    pub month: String,
    pub activated: i64,
}

/// Per-city agreement between the rollout report and the field status.
#[derive(Debug, Serialize, FromRow)]
pub struct AlignmentRow {
    pub city: String,
    pub aligned: i64,
    pub mismatched: i64,
}

/// Readiness within a nano cluster.
#[derive(Debug, Serialize, FromRow)]
pub struct ClusterReadinessRow {
    pub cluster: String,
    pub total_sites: i64,
    pub ready_sites: i64,
}

/// Planned versus actual site count per rollout week.
#[derive(Debug, Serialize, FromRow)]
pub struct ProgressPointRow {
    pub week: NaiveDate,
    pub planned: i64,
    pub actual: i64,
}

/// Site count per vendor and field status.
#[derive(Debug, Serialize, FromRow)]
pub struct VendorStatusRow {
    pub vendor_name: String,
    pub status: String,
    pub sites: i64,
}

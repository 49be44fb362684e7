//! Contract between the chart handlers and whatever fetches their data.

use crate::filters::FilterSelection;
use async_trait::async_trait;
use serde_json::Value;

/// One method per chart data product, plus the parameterless filter-options
/// product and a health probe.
///
/// Implementations receive the decoded filter selection as-is: values are
/// not validated against the catalog, and unknown values simply restrict the
/// result to nothing. Methods return the JSON the client will receive
/// verbatim; handlers never reshape it.
#[async_trait]
pub trait ChartDataSource: Send + Sync {
    async fn activated_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value>;

    async fn data_alignment(&self, filter: &FilterSelection) -> anyhow::Result<Value>;

    async fn nano_cluster(&self, filter: &FilterSelection) -> anyhow::Result<Value>;

    async fn progress_curve(&self, filter: &FilterSelection) -> anyhow::Result<Value>;

    async fn readiness_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value>;

    async fn filter_options(&self) -> anyhow::Result<Value>;

    async fn health_check(&self) -> anyhow::Result<()>;
}

//! Postgres-backed chart data source.

use crate::filters::{FilterRegistry, FilterSelection};
use crate::models::{
    AlignmentRow, ClusterReadinessRow, MonthlyActivationRow, ProgressPointRow, VendorStatusRow,
};
use crate::services::charts::ChartDataSource;
use crate::services::metrics::DB_QUERY_DURATION;
use async_trait::async_trait;
use serde_json::{json, Value};
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Shared predicate applied by every chart query: an empty array means no
/// restriction, anything else is passed through as-is.
const FILTER_PREDICATES: &str = r#"
    (cardinality($1::text[]) = 0 OR vendor_name = ANY($1))
    AND (cardinality($2::text[]) = 0 OR program_report = ANY($2))
    AND (cardinality($3::text[]) = 0 OR imp_ttp = ANY($3))
    AND ($4 = '' OR site_id ILIKE '%' || $4 || '%')
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "dashboard-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

/// [`ChartDataSource`] over the `site_rollout` table.
pub struct PgChartData {
    db: Database,
    registry: Arc<FilterRegistry>,
}

impl PgChartData {
    pub fn new(db: Database, registry: Arc<FilterRegistry>) -> Self {
        Self { db, registry }
    }

    async fn fetch<R>(
        &self,
        operation: &str,
        sql: String,
        filter: &FilterSelection,
    ) -> anyhow::Result<Value>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>
            + serde::Serialize
            + Send
            + Unpin
            + 'static,
    {
        let timer = DB_QUERY_DURATION
            .with_label_values(&[operation])
            .start_timer();

        let rows: Vec<R> = sqlx::query_as(&sql)
            .bind(&filter.vendor_names)
            .bind(&filter.program_reports)
            .bind(&filter.imp_ttps)
            .bind(&filter.search_text)
            .fetch_all(self.db.pool())
            .await?;

        timer.observe_duration();
        Ok(serde_json::to_value(rows)?)
    }
}

#[async_trait]
impl ChartDataSource for PgChartData {
    /// Sites brought on air per month.
    async fn activated_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        let sql = format!(
            r#"
            SELECT to_char(date_trunc('month', on_air_date), 'YYYY-MM') AS month,
                   COUNT(*) AS activated
            FROM site_rollout
            WHERE on_air_date IS NOT NULL AND {FILTER_PREDICATES}
            GROUP BY 1
            ORDER BY 1
            "#
        );
        self.fetch::<MonthlyActivationRow>("activated_chart", sql, filter)
            .await
    }

    /// Report status versus field status, per city.
    async fn data_alignment(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        let sql = format!(
            r#"
            SELECT city,
                   COUNT(*) FILTER (WHERE report_status = site_status) AS aligned,
                   COUNT(*) FILTER (WHERE report_status IS DISTINCT FROM site_status) AS mismatched
            FROM site_rollout
            WHERE {FILTER_PREDICATES}
            GROUP BY city
            ORDER BY city
            "#
        );
        self.fetch::<AlignmentRow>("data_alignment", sql, filter)
            .await
    }

    /// On-air readiness per nano cluster.
    async fn nano_cluster(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        let sql = format!(
            r#"
            SELECT nano_cluster AS cluster,
                   COUNT(*) AS total_sites,
                   COUNT(*) FILTER (WHERE site_status = 'on_air') AS ready_sites
            FROM site_rollout
            WHERE {FILTER_PREDICATES}
            GROUP BY 1
            ORDER BY 1
            "#
        );
        self.fetch::<ClusterReadinessRow>("nano_cluster", sql, filter)
            .await
    }

    /// Planned versus actual site count per rollout week.
    async fn progress_curve(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        let sql = format!(
            r#"
            SELECT date_trunc('week', plan_date)::date AS week,
                   COUNT(*) AS planned,
                   COUNT(*) FILTER (WHERE on_air_date IS NOT NULL) AS actual
            FROM site_rollout
            WHERE plan_date IS NOT NULL AND {FILTER_PREDICATES}
            GROUP BY 1
            ORDER BY 1
            "#
        );
        self.fetch::<ProgressPointRow>("progress_curve", sql, filter)
            .await
    }

    /// Site count per vendor and field status.
    async fn readiness_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        let sql = format!(
            r#"
            SELECT vendor_name, site_status AS status, COUNT(*) AS sites
            FROM site_rollout
            WHERE {FILTER_PREDICATES}
            GROUP BY vendor_name, site_status
            ORDER BY vendor_name, site_status
            "#
        );
        self.fetch::<VendorStatusRow>("readiness_chart", sql, filter)
            .await
    }

    /// Catalog values with display labels, straight from the registry.
    async fn filter_options(&self) -> anyhow::Result<Value> {
        let mut options = serde_json::Map::new();

        for category in self.registry.categories() {
            let values: Vec<Value> = self
                .registry
                .category(category)
                .iter()
                .map(|value| {
                    json!({
                        "value": value,
                        "label": self.registry.display_name(category, value),
                    })
                })
                .collect();
            options.insert(category.to_string(), Value::Array(values));
        }

        Ok(Value::Object(options))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1").execute(self.db.pool()).await?;

        timer.observe_duration();
        Ok(())
    }
}

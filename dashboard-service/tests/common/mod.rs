use async_trait::async_trait;
use dashboard_service::config::{DashboardConfig, DatabaseConfig};
use dashboard_service::filters::FilterSelection;
use dashboard_service::services::ChartDataSource;
use dashboard_service::startup::Application;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Data source that records every call and returns a canned payload.
pub struct RecordingChartSource {
    pub calls: Mutex<Vec<(&'static str, FilterSelection)>>,
    pub response: Value,
}

impl RecordingChartSource {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response,
        })
    }

    pub fn calls(&self) -> Vec<(&'static str, FilterSelection)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, chart: &'static str, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.calls.lock().unwrap().push((chart, filter.clone()));
        Ok(self.response.clone())
    }
}

#[async_trait]
impl ChartDataSource for RecordingChartSource {
    async fn activated_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.record("activated-chart", filter)
    }

    async fn data_alignment(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.record("data-alignment", filter)
    }

    async fn nano_cluster(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.record("nano-cluster", filter)
    }

    async fn progress_curve(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.record("progress-curve", filter)
    }

    async fn readiness_chart(&self, filter: &FilterSelection) -> anyhow::Result<Value> {
        self.record("readiness-chart", filter)
    }

    async fn filter_options(&self) -> anyhow::Result<Value> {
        self.record("filter-options", &FilterSelection::default())
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Data source whose every chart method fails.
pub struct FailingChartSource;

#[async_trait]
impl ChartDataSource for FailingChartSource {
    async fn activated_chart(&self, _filter: &FilterSelection) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn data_alignment(&self, _filter: &FilterSelection) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn nano_cluster(&self, _filter: &FilterSelection) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn progress_curve(&self, _filter: &FilterSelection) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn readiness_chart(&self, _filter: &FilterSelection) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn filter_options(&self) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the service on a random port around the given data source.
    pub async fn spawn(charts: Arc<dyn ChartDataSource>) -> Self {
        let config = DashboardConfig {
            common: service_core::config::Config {
                port: 0,
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/unused".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
        };

        let app = Application::build_with_chart_source(config, charts)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    /// Canned chart payload used by most tests.
    pub fn sample_payload() -> Value {
        json!([
            {"week": "2024-03-04", "planned": 120, "actual": 96},
            {"week": "2024-03-11", "planned": 150, "actual": 131}
        ])
    }
}

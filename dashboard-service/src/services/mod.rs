pub mod charts;
pub mod database;
pub mod metrics;

pub use charts::ChartDataSource;
pub use database::{Database, PgChartData};
pub use metrics::{get_metrics, init_metrics};

//! Backend API for the Hermes 5G rollout progress dashboard.
//!
//! Chart endpoints decode the client's filter selection from the query
//! string, delegate to a [`services::ChartDataSource`], and return the
//! source's JSON untouched. All failures surface as the uniform error
//! envelope from `service-core`.

pub mod config;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

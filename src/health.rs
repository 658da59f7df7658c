// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Health checks and keep-alive endpoints
//!
//! Hosting platforms that sleep idle services probe `/`; `/health` reports
//! component status for monitoring.

use crate::constants::{SERVICE_NAME, SERVICE_VERSION};
use crate::database::Database;
use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Overall health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service information
    pub service: ServiceInfo,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
    /// Response timestamp
    pub timestamp: u64,
}

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
}

/// Individual component health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: String,
}

/// Health checker for the Moraby bot
#[derive(Clone)]
pub struct HealthChecker {
    start_time: Instant,
    database: Database,
}

impl HealthChecker {
    pub fn new(database: Database) -> Self {
        Self {
            start_time: Instant::now(),
            database,
        }
    }

    /// Full health check including database connectivity.
    pub async fn check(&self) -> HealthResponse {
        let database_check = match self.database.ping().await {
            Ok(()) => ComponentHealth {
                name: "database".to_string(),
                status: HealthStatus::Healthy,
                message: "Database is reachable".to_string(),
            },
            Err(err) => ComponentHealth {
                name: "database".to_string(),
                status: HealthStatus::Degraded,
                message: format!("Database check failed: {}", err),
            },
        };

        let checks = vec![
            ComponentHealth {
                name: "service".to_string(),
                status: HealthStatus::Healthy,
                message: "Service is running".to_string(),
            },
            database_check,
        ];

        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthResponse {
            status,
            service: ServiceInfo {
                name: SERVICE_NAME.to_string(),
                version: SERVICE_VERSION.to_string(),
                uptime_seconds: self.start_time.elapsed().as_secs(),
            },
            checks,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Warp filters for the keep-alive endpoints.
pub mod routes {
    use super::HealthChecker;
    use warp::Filter;

    /// `GET /` keep-alive probe plus `GET /health` status report.
    pub fn health_routes(
        checker: HealthChecker,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let home = warp::path::end()
            .and(warp::get())
            .map(|| "ربات زنده است!");

        let checker_filter = warp::any().map(move || checker.clone());
        let health = warp::path("health")
            .and(warp::get())
            .and(checker_filter)
            .and_then(|checker: HealthChecker| async move {
                let response = checker.check().await;
                Ok::<_, warp::Rejection>(warp::reply::json(&response))
            });

        home.or(health)
    }
}

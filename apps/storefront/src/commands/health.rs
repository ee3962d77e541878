//! Health check command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use storefront_db::Database;

/// Service status for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HealthStatus {
    /// `"ok"` when the catalog is reachable, `"degraded"` otherwise
    pub status: String,
    pub database_connected: bool,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// Reports whether the catalog database answers queries.
pub async fn health(db: &Database) -> HealthStatus {
    debug!("health command");

    let database_connected = db.health_check().await;
    if !database_connected {
        warn!("Health check: database unreachable");
    }

    HealthStatus {
        status: if database_connected { "ok" } else { "degraded" }.to_string(),
        database_connected,
        timestamp: Utc::now(),
    }
}

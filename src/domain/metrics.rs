use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time telemetry reading, keyed by metric name.
///
/// The key set is not fixed: a metric that could not be gathered on a given
/// tick (e.g. `pod_count` while the cluster is unreachable) is simply absent,
/// so "unknown" stays distinguishable from zero.
pub type MetricSet = HashMap<String, f64>;

/// A timestamped, immutable MetricSet as stored in history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub timestamp: DateTime<Utc>,
    pub metrics: MetricSet,
}

impl MetricSnapshot {
    pub fn new(timestamp: DateTime<Utc>, metrics: MetricSet) -> Self {
        Self { timestamp, metrics }
    }
}

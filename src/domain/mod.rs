pub mod activity;
pub mod metrics;
pub mod recommendation;
pub mod workload;

pub use activity::{ActivityEntry, Prediction, RecentAction};
pub use metrics::{MetricSet, MetricSnapshot};
pub use recommendation::{Recommendation, RecommendationStatus};
pub use workload::{WorkloadDescriptor, WorkloadKind, WorkloadPhase};

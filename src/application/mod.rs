pub mod overview;
pub mod registry;
pub mod sampler;

pub use overview::{OverviewPayload, OverviewService, StatusCards};
pub use registry::{ActivityLog, RecommendationRegistry, RegistryError};
pub use sampler::Sampler;

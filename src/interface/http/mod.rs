pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ChatProxy};
pub use routes::create_router;

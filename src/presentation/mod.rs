pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

pub use config::{Environment, Settings};
pub use router::{RouterOptions, create_router};
pub use state::AppState;
pub use templates::chat_templates;

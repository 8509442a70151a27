mod error;
mod generate;
mod health;
mod index;
mod session;
mod upload;

pub use error::{ErrorResponse, error_response};
pub use generate::{GenerateRequest, GenerateResponse, generate_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use session::{SESSION_COOKIE, resolve_session};
pub use upload::{UploadResponse, upload_file_handler};

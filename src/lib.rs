pub mod error;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::Config;
pub use services::{DocumentChat, IngestRequest, Ingestor, SessionStore};

pub mod connection_repository;
pub mod error;
pub mod reading_repository;

pub use connection_repository::ConnectionRepository;
pub use error::{DbError, Result};
pub use reading_repository::ReadingRepository;

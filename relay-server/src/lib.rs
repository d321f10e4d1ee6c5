pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    error::{ApiError, Result as ApiResult},
    readings::{
        create_reading_request::CreateReadingRequest, reading_response::ReadingResponse,
        readings::create_reading,
    },
};

pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::routes::build_router;

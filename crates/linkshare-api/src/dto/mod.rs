//! Request and response data transfer objects.

pub mod request;
pub mod response;

pub use request::PublicShareQuery;
pub use response::{ApiResponse, HealthResponse, TransferResponse, WriteResponse};

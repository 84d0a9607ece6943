//! Share domain entities.

pub mod model;
pub mod request;

pub use model::{SharePermission, ShareLink};
pub use request::{CreateShareBody, ExpiryUnit, PublicShareBody};

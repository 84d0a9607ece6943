//! In-memory repository implementations.

pub mod share;
pub mod user;

pub use share::ShareRepository;
pub use user::UserRepository;

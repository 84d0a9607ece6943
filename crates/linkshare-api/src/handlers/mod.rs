//! Route handlers organized by domain.

pub mod health;
pub mod public;
pub mod share;

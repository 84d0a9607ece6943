//! Core type definitions used across the LinkShare workspace.

pub mod id;

pub use id::UserId;

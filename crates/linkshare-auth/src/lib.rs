//! # linkshare-auth
//!
//! Authentication primitives for LinkShare.
//!
//! ## Modules
//!
//! - `jwt`: Bearer token creation and validation for authenticated callers
//! - `password`: Argon2id hashing of share link passwords
//! - `random`: OS-backed secure random bytes for link hashes and tokens

pub mod jwt;
pub mod password;
pub mod random;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use random::OsRandom;

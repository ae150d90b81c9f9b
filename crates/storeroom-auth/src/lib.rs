//! # storeroom-auth
//!
//! Identity primitives for Storeroom.
//!
//! ## Modules
//!
//! - `jwt`: access token creation, validation, and revocation
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;

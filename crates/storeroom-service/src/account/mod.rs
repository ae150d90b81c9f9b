//! Account registration, login, and token lifecycle.

pub mod service;

pub use service::{AccountService, LoginSession};

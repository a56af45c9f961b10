//! Password sign-in and session tokens.
//!
//! ## Module Organization
//!
//! - `token`: HMAC-signed session tokens issued on sign-in and checked on every protected request

pub mod token;

pub use token::{Claims, TokenAuthority};

//! # ChipIn Security
//!
//! Bearer token handling. Tokens are issued elsewhere; this crate validates
//! them and tells the API which user is calling.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};

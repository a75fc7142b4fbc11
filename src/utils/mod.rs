//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Salted-hash short code generation
//! - [`url_validator`] - URL acceptance rules
//! - [`link_limits`] - Click budget and expiration window checks
//! - [`input_validator`] - Login and password shape checks
//! - [`password`] - Argon2id credential hashing

pub mod code_generator;
pub mod input_validator;
pub mod link_limits;
pub mod password;
pub mod url_validator;

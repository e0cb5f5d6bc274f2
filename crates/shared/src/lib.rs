//! Shared utilities for the Operations Portal backend.
//!
//! - JWT verification for tokens issued by the identity provider
//! - Common validation logic

pub mod jwt;
pub mod validation;

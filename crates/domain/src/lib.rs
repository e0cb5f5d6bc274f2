//! Domain layer for the Operations Portal backend.
//!
//! This crate contains:
//! - Domain models (news categories and items, CMS placements, principals)
//! - Pure business logic: feed ordering and resource grouping

pub mod models;
pub mod services;

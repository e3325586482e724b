//! API Routes
//!
//! Route handlers organized by functionality.

pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod reviews;

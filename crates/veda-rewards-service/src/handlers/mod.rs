//! API handlers.

pub mod achievements;
pub mod activities;
pub mod claims;
pub mod consultations;
pub mod health;
pub mod stats;

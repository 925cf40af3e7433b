//! Route handlers organized by resource

pub mod articles;
pub mod health;

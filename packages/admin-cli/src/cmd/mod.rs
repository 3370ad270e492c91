//! Command implementations

pub mod coupons;
pub mod login;
pub mod resources;
pub mod search;

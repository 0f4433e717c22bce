//! Application services layer.

pub mod chrome;
pub mod error;
pub mod posts;
pub mod repos;

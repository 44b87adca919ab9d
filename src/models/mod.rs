//! Database models shared across the client repository.

pub mod address;
pub mod catalog;
pub mod client;
#[cfg(any(feature = "api", feature = "web"))]
pub mod config;
pub mod contact;
pub mod phone;

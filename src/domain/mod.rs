//! Domain aggregates exposed by the client administration service layer.

pub mod address;
pub mod catalog;
pub mod client;
pub mod contact;
pub mod phone;
pub mod types;

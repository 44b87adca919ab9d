//! Wire types shared by the JSON API and the front end.

pub mod api;

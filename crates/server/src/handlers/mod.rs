//! HTTP request handlers.

pub mod admin;
pub mod gallery;
pub mod images;
pub mod uploads;

pub use admin::*;
pub use gallery::*;
pub use images::*;
pub use uploads::*;

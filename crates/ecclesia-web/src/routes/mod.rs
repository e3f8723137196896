//! Route handlers.

pub mod api;
pub mod cells;
pub mod dashboard;
pub mod events;
pub mod finances;
pub mod members;
pub mod page;
pub mod resource;
pub mod session;

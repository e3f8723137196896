//! Ecclesia Core Library
//!
//! Domain models and view logic for the church-management application:
//! members, cells, finances, events and the dashboard. The four record
//! kinds share one generic editor ([`resource::ResourceView`]); each kind
//! only describes its shape, validation and table.

pub mod badge;
pub mod cell;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod finance;
pub mod forms;
pub mod member;
pub mod resource;
pub mod session;

pub use error::{ChurchError, ChurchResult};
pub use resource::{Confirm, EditMode, Editor, Resource, ResourceView};

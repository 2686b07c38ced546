//! Controller for the "create a compute workspace" wizard.
//!
//! The wizard walks a draft through four steps (template, image, compute,
//! scheduler), keeps derived fields consistent, and assembles the request
//! submitted to the provisioning backend.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;
pub mod wizard;

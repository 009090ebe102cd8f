//! # HAL Todo Sample Library
//!
//! This library exposes the core modules of the application for integration testing.

pub mod lifecycle;
pub mod model;
pub mod todo_list_resource;
pub mod todo_resource;

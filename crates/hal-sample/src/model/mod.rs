//! Plain data structures served by the todo resources.

pub mod todo;

pub use todo::*;

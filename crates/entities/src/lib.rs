//! Core entity definitions for the task tracking API.
//!
//! The API manages a single entity, [`Task`]. Partial modifications are
//! described by [`TaskUpdate`].

mod task;

pub use task::*;

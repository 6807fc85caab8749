//! Data Transfer Objects for the broker API
//!
//! Request and response bodies that only exist on the wire: authentication,
//! task submission, and the envelope list endpoints answer with.

pub mod auth;
pub mod page;
pub mod task;

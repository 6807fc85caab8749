//! Core domain types
//!
//! These types mirror the records the broker hands out. Fields the client does
//! not model are kept verbatim in an `extra` map so nothing is lost when a
//! record is printed or passed along.

pub mod collaboration;
pub mod node;
pub mod result;
pub mod task;
mod serde_util;

pub use serde_util::{Related, ResourceRef};

//! Cohort Core
//!
//! Core types for talking to a federated-analytics broker.
//!
//! This crate contains:
//! - Domain types: Broker entities (Collaboration, Node, Task, ResultRecord)
//! - DTOs: Request and response bodies exchanged with the broker API

pub mod domain;
pub mod dto;

//! Labtrack - Maintenance Ticket Workflow Core
//!
//! This crate implements the stage-based workflow for physical-asset
//! maintenance tickets: the stage catalogue, per-stage completion
//! evaluation, contiguous-prefix progress, conditional branching on
//! in-house resolution, cursor navigation and closure synchronization.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

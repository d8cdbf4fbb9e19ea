//! Shared utilities for the TeamDesk notification client.
//!
//! This crate provides common functionality used across the other crates:
//! - Validation helpers for notification payloads and preferences

pub mod validation;

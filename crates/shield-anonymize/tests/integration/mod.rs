//! Integration tests for ticket-shield anonymization.
//!
//! This module covers:
//! - Mapping store assignment and recovery
//! - Anonymization over realistic ticket text
//! - Round-trip restoration
//! - Snapshot persistence
//! - Custom recognizers

pub mod common;

pub mod anonymization;
pub mod mapping;
pub mod persistence;
pub mod recognizers;

//! Core types and pure logic for propman.
//!
//! Storage-agnostic: backends implement [`storage::MigrationStore`] in the
//! application crate.

pub mod storage;
pub mod tenancy;

//! Import/Export Hub Core - Shared types library.
//!
//! This crate provides common types used across the Import/Export Hub
//! components:
//! - `api` - HTTP service exposing the products and imports collections
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe document identifiers and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Foundation types and traits for devcon.
//!
//! This crate contains the platform-agnostic types shared by the console
//! core and its hosts: key codes and per-frame keyboard snapshots, message
//! severities, the text-measurement and key-mapping backend traits,
//! configuration, and error types.

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod keymap;
pub mod severity;

//! Core infrastructure shared by the fetchers
//!
//! Configuration, cache layout, locking, errors and terminal output.

pub mod config;
pub mod error;
pub mod layout;
pub mod lock;
pub mod output;

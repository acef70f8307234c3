//! Low-level helpers used by the artifact cache
//!
//! - **http**: blocking GET into memory or a writer, with length checks
//! - **cmd**: checked subprocess execution
//! - **git**: clone and pull for tool checkouts
//! - **fs_utils**: atomic cache writes and cached-file reads

pub mod cmd;
pub mod fs_utils;
pub mod git;
pub mod http;

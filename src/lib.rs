//! rowmine - create Redmine issues from tabular row streams
//!
//! Maps configured or row-sourced field values onto a tracker's create-issue
//! operation, with optional duplicate suppression: for each row, resolve a
//! draft, look up the target project, search for an existing open issue with
//! the same project and subject, and create the issue when no duplicate is
//! found. Outcomes are reported per row; one bad row never stops the stream.

pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod submit;
pub mod tracker;
pub mod types;

//! Core library for the `hnprobe` CLI.
//!
//! The building blocks are usable on their own: [`http`] is a retrying
//! transport that normalizes answers into envelopes, [`hn`] maps Hacker News
//! operations onto it, and [`validate`] and [`schema`] check decoded
//! payloads. [`suite`] and [`report`] assemble those into the runs the
//! binary performs.
pub mod args;
pub mod config;
pub mod error;
pub mod hn;
pub mod http;
pub mod report;
pub mod schema;
pub mod suite;
pub mod validate;

//! Pitchline - Stage-Aware Sales Conversation Agent
//!
//! This crate drives a scripted sales conversation through a fixed catalog of
//! stages, orchestrating language-model calls for stage classification and
//! utterance generation, with an optional bounded tool-invocation loop for
//! product lookups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

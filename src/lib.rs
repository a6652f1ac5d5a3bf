//! `pm_lite` - Lightweight issue lifecycle tracker library
//!
//! This crate provides the CLI layer for the `pml` tool. The domain
//! logic (state machine, dependency graph, urgency scoring, key
//! generation, scope resolution) lives in the `pm-engine` crate.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Project registry and per-project file locations
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

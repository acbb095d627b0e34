//! Time-Clock Pattern Classification & Scoring Engine
//!
//! This crate classifies employee time-clock punch pairs against an expected
//! daily schedule, detects attendance anomalies, and folds them into
//! per-employee, per-period scores.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;

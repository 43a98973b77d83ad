//! Core library for the `statflush` metrics backend.
//!
//! This crate is the output stage of a statsd-style pipeline: the hosting
//! process accumulates counters, timers, gauges, and sets, and on each flush
//! tick hands the exporter a snapshot plus a unix timestamp. The exporter
//! summarizes the snapshot, renders the Graphite plaintext line protocol,
//! and ships the batch over one TCP connection per flush. Intake, scheduling,
//! and backend registration belong to the host.
pub mod config;
pub mod encode;
pub mod error;
pub mod exporter;
pub mod logger;
pub mod metrics;

//! Chartify Titles - title catalog CSV cleaning & EDA dashboard
//!
//! Loads a film/TV title export, cleans it, filters it by type and computes
//! the aggregates behind six descriptive charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;

//! Genetic search for generator maintenance timetables.
//!
//! A schedule assigns every generating unit one maintenance pattern from its
//! own catalog of legal patterns. The search maximizes the smallest spare
//! capacity margin over the planning horizon; any schedule that leaves an
//! interval short of its peak load is scored with a sentinel.
//!
//! - [`domain`]: fleet, horizon and catalogs, validated up front
//! - [`fitness`]: the maximin scoring function
//! - [`operators`]: tournament selection, uniform crossover, point mutation
//! - [`genetic_optimizer`]: the generational driver

pub mod benchmark;
pub mod demo_data;
pub mod domain;
pub mod error;
pub mod fitness;
pub mod genetic_algorithm;
pub mod genetic_optimizer;
pub mod monitor;
pub mod operators;

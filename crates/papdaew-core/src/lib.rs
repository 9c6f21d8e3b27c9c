//! Service plumbing shared by Papdaew services: env config, tracing, health probes,
//! request ids and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

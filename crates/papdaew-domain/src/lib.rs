//! Domain types shared across Papdaew services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; the `infra/` layer converts at its edges.

pub mod permission;
pub mod user;

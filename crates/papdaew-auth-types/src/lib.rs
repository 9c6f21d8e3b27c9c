//! Auth types shared across Papdaew services.
//!
//! Provides session JWT issuance/validation, the session cookie builders, and the
//! `IdentityHeaders` extractor.

pub mod cookie;
pub mod identity;
pub mod token;

//! # Config Crate
//!
//! Centralized configuration constants for the RWX loading pipeline.
//! All magic numbers and tunable defaults are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{UNIT_SCALE, SIGN_TAG};
//!
//! // The source format works in decameters relative to the engine unit
//! assert_eq!(UNIT_SCALE, 10.0);
//!
//! // Faces tagged with this value carry a sign texture
//! assert_eq!(SIGN_TAG, 100);
//! ```

pub mod constants;

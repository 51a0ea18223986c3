//! Auth types shared across Pantry services.
//!
//! Authentication happens upstream; this crate only reads the identity the
//! gateway forwards.

pub mod identity;

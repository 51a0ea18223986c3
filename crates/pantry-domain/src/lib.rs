//! Domain types shared across all Pantry crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from
//! storage rows at its boundary.

pub mod id;
pub mod pagination;
pub mod user;

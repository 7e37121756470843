//! Domain records for quotes, favorites and diary entries.
//!
//! # Responsibility
//! - Define the shapes returned by repositories and handlers.
//! - Hold input hardening rules applied before any store access.
//!
//! # Invariants
//! - Quotes are read-only reference data after seeding.
//! - Favorites reference quotes by id only; the reference may dangle.

pub mod diary;
pub mod favorite;
pub mod quote;
pub mod validation;

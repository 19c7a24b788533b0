//! # Base types for rookery
//!
//! This is an auxiliary crate for `rookery`, which contains the board coordinates, pieces and
//! square sets. It is kept apart from the rules engine so that these types can be shared by
//! tools that never validate moves.
//!
//! Normally you don't want to use this crate directly. Use `rookery` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;

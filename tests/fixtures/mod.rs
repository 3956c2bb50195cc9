//! Test fixtures for delivery-planner.
//!
//! Provides outlets around a real depot location in Istanbul.

#![allow(dead_code)]

pub mod istanbul_outlets;

pub use istanbul_outlets::*;

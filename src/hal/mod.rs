//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `sim`: Desktop simulation rig for the `desktop_sim` binary (requires `std`)

pub mod mock;

#[cfg(feature = "std")]
pub mod sim;

pub use mock::*;

#[cfg(feature = "std")]
pub use sim::*;

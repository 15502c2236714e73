//! Core types shared by the drone renderer
//!
//! This crate provides:
//! - The per-frame data model handed over by the simulation (vehicle state, motors, targets)
//! - Display configuration loaded from JSON
//! - The normalized-to-pixel coordinate mapper
//! - The error type used across the workspace

pub mod config;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod state;

pub use config::*;
pub use error::{Result, VizError};
pub use frame::*;
pub use mapper::CoordinateMapper;
pub use state::*;

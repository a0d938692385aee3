//! Map state controller for cohort geodata.
//!
//! `CohortMap` owns the lifecycle of one map view: it checks whether a
//! source has geodata, fits the viewport to a cohort's bounds, and replaces
//! density or cluster layers for the visible window. Rendering and HTTP are
//! reached through the `RenderSurface` and `transport::GisFetch` seams.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod state;
pub mod surface;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use events::*;
pub use state::*;
pub use surface::*;

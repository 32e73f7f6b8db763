//! Lane Racer Library
//!
//! A lane-based racing simulation that runs headless; any display can drive
//! it through commands and snapshots.

pub mod simulation;

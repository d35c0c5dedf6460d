//! kerf-export: Pure format serializers (sans-IO)
//!
//! Converts pipeline geometry into output formats. Currently supports
//! G-code for GRBL-style laser engravers.

pub mod gcode;

pub use gcode::{CUT_FEED, GcodeConfig, SPINDLE_POWER, TRAVEL_FEED, Transform, to_gcode};

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the compiler:
//! - Math types and transform helpers
//! - Logging initialisation

pub mod math;
pub mod logging;

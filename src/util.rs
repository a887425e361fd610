//! Utility functions and structures.

pub mod walk;

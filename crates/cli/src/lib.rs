//! CLI utilities for the mealscore binary
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Status messages

#![warn(missing_docs)]

pub mod output;

/*!
 * Error types for the subsync engine.
 *
 * This module contains custom error types for the segmentation and
 * alignment stages, using the thiserror crate for ergonomic error
 * definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during text segmentation
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// Caller passed a cue length budget that cannot hold any text
    #[error("Invalid max cue length: {0} (must be at least 1)")]
    InvalidMaxLength(usize),
}

/// Errors that can occur during timestamp alignment
///
/// Alignment degrades to heuristic timing instead of failing, so this
/// enum is currently empty; it exists for API stability.
#[derive(Error, Debug)]
pub enum AlignmentError {}

/// Main engine error type that wraps all other errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Narration text was supplied without any character timestamps
    #[error("Cannot align cues: timestamp sequence is empty")]
    EmptyTimestamps,

    /// Error from text segmentation
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Error from timestamp alignment
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for EngineError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

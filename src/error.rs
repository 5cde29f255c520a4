/*
 * This file is part of Actuation Curve.
 *
 * Copyright (C) 2025 Actuation Curve contributors
 *
 * Actuation Curve is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Actuation Curve is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Actuation Curve. If not, see <https://www.gnu.org/licenses/>.
 */

//! Unified error handling for the curve editor
//!
//! Drag constraint violations are never errors; they are repaired in place by
//! [`crate::curves::CurveModel`]. Everything listed here is surfaced to the caller.

use std::io;
use std::path::PathBuf;

/// Result type alias using CurveError
pub type Result<T> = std::result::Result<T, CurveError>;

#[derive(thiserror::Error, Debug)]
pub enum CurveError {
    // ============================================================================
    // Curve Model Errors
    // ============================================================================
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Point index {index} out of range (curve has {len} points)")]
    IndexOutOfRange {
        index: usize,
        len: usize,
    },

    /// Two adjacent points share an x value, so the segment has no slope.
    /// Unreachable through `CurveModel`; signals a broken invariant.
    #[error("Degenerate segment {index}: both ends at x = {x}")]
    DegenerateSegment {
        index: usize,
        x: f64,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    #[error("Invalid drag command '{input}': {reason}")]
    InvalidCommand {
        input: String,
        reason: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CurveError {
    pub fn invalid_seed(msg: impl Into<String>) -> Self {
        Self::InvalidSeed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that indicate a bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::DegenerateSegment { .. })
    }
}

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

//! Actuation Curve - shape a monotonic switch response curve
//!
//! This library provides the curve model (control points kept ordered and
//! monotonic while they are dragged), the emitter that turns the curve into
//! a piecewise-linear C function, and the config/logging around them.

pub mod error;
pub mod curves;
pub mod emitter;
pub mod config;
pub mod logger;
pub mod script;
pub mod app;

#[cfg(test)]
pub mod test_utils;

pub use curves::{ControlPoint, CurveLimits, CurveModel, CurveObserver};
pub use emitter::{emit, emit_function, segments, PiecewiseSegment};
pub use error::{CurveError, Result};

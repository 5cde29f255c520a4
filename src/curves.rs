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

//! Actuation force curve model
//!
//! Holds a fixed number of control points mapping switch travel (x) to analog
//! output (y) and keeps them valid while one of them is being dragged.
//!
//! # Invariants
//!
//! After construction and after every [`CurveModel::update_drag`]:
//!
//! 1. The x of the first and last point never change.
//! 2. x is strictly increasing by index.
//! 3. y is strictly increasing by index.
//! 4. Every coordinate lies within `[limits.min, limits.max]`.
//!
//! Violations caused by a drag are repaired in place, never reported.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};

/// Reference seed on a 0..100 domain: evenly spaced along the diagonal
pub const DEFAULT_SEED: [(f64, f64); 4] = [(0.0, 0.0), (33.0, 33.0), (66.0, 66.0), (100.0, 100.0)];

pub const DEFAULT_DOMAIN_MIN: f64 = 0.0;
pub const DEFAULT_DOMAIN_MAX: f64 = 100.0;
pub const DEFAULT_MIN_SEPARATION: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Switch travel in percent
    pub x: f64,
    /// Analog output in percent
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Parameters of the drag constraint algorithm
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveLimits {
    pub min: f64,
    pub max: f64,
    /// Minimum gap kept between neighbouring points on both axes
    pub min_separation: f64,
    /// Truncate proposed coordinates to whole units before applying them.
    /// Only the dragged point is snapped; neighbours moved by the repair
    /// pass land on `neighbour ± separation`.
    pub snap_to_integer: bool,
}

impl Default for CurveLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_DOMAIN_MIN,
            max: DEFAULT_DOMAIN_MAX,
            min_separation: DEFAULT_MIN_SEPARATION,
            snap_to_integer: false,
        }
    }
}

impl CurveLimits {
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CurveError::config("domain bounds must be finite"));
        }
        if self.min >= self.max {
            return Err(CurveError::config(format!(
                "domain min ({}) must be below domain max ({})",
                self.min, self.max
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(CurveError::config("min_separation must be a positive number"));
        }
        if !resolvable(self.min.abs().max(self.max.abs()), self.min_separation) {
            return Err(CurveError::config(format!(
                "min_separation ({}) is below float precision for a domain of [{}, {}]",
                self.min_separation, self.min, self.max
            )));
        }
        Ok(())
    }

    /// Gap actually kept between `n` points spread over `[lo, hi]`
    fn effective_separation(&self, lo: f64, hi: f64, n: usize) -> f64 {
        self.min_separation.min((hi - lo) / (n - 1) as f64)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Turn a proposed coordinate into something inside the domain.
    /// NaN keeps `current`; infinities clamp to the nearest bound.
    fn sanitize(&self, proposed: f64, current: f64) -> f64 {
        if proposed.is_nan() {
            return current;
        }
        let v = if self.snap_to_integer { proposed.trunc() } else { proposed };
        v.max(self.min).min(self.max)
    }
}

/// Receives a snapshot of the points after every change made by a drag
#[cfg_attr(test, mockall::automock)]
pub trait CurveObserver {
    fn curve_changed(&mut self, points: &[ControlPoint]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, p: &ControlPoint) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    fn set(self, p: &mut ControlPoint, v: f64) {
        match self {
            Axis::X => p.x = v,
            Axis::Y => p.y = v,
        }
    }
}

/// `sep` is at least one ulp at `scale`, so `v ± sep != v` for any `|v| <= scale`
fn resolvable(scale: f64, sep: f64) -> bool {
    sep > scale * f64::EPSILON
}

/// Clamp into `[lower, upper]`, or pin to `lower` when the interval is empty
fn pin(value: f64, lower: f64, upper: f64) -> f64 {
    if lower > upper {
        lower
    } else {
        value.max(lower).min(upper)
    }
}

pub struct CurveModel {
    points: Vec<ControlPoint>,
    limits: CurveLimits,
    active: Option<usize>,
    observers: Vec<Box<dyn CurveObserver>>,
}

impl fmt::Debug for CurveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveModel")
            .field("points", &self.points)
            .field("limits", &self.limits)
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CurveModel {
    /// Build a model from an ordered seed.
    ///
    /// The seed needs at least two points, every coordinate inside the
    /// domain, and strictly increasing x and y.
    pub fn new<I, P>(seed: I, limits: CurveLimits) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<ControlPoint>,
    {
        limits.validate()?;
        let points: Vec<ControlPoint> = seed.into_iter().map(Into::into).collect();
        validate_seed(&points, &limits)?;
        let n = points.len();
        let (first_x, last_x) = (points[0].x, points[n - 1].x);
        let sep_x = limits.effective_separation(first_x, last_x, n);
        let sep_y = limits.effective_separation(limits.min, limits.max, n);
        if !resolvable(first_x.abs().max(last_x.abs()), sep_x)
            || !resolvable(limits.min.abs().max(limits.max.abs()), sep_y)
        {
            return Err(CurveError::config(format!(
                "{} points cannot be kept apart at float precision on this domain",
                n
            )));
        }
        Ok(Self {
            points,
            limits,
            active: None,
            observers: Vec::new(),
        })
    }

    /// Build a model from [`DEFAULT_SEED`] rescaled onto the configured domain
    pub fn with_default_seed(limits: CurveLimits) -> Result<Self> {
        let span = limits.max - limits.min;
        let seed = DEFAULT_SEED
            .iter()
            .map(|&(x, y)| ControlPoint::new(limits.min + x * span / 100.0, limits.min + y * span / 100.0));
        Self::new(seed, limits)
    }

    pub fn subscribe(&mut self, observer: Box<dyn CurveObserver>) {
        self.observers.push(observer);
    }

    pub fn limits(&self) -> &CurveLimits {
        &self.limits
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a model holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn snapshot(&self) -> Vec<ControlPoint> {
        self.points.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging `index`. Retargets an ongoing drag.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }

    /// Move the active point towards `(proposed_x, proposed_y)`.
    ///
    /// Returns the accepted position, or `None` when no drag is active.
    pub fn update_drag(&mut self, proposed_x: f64, proposed_y: f64) -> Option<ControlPoint> {
        let index = self.active?;
        let before = self.points.clone();

        if !self.is_endpoint(index) {
            let x = self.limits.sanitize(proposed_x, self.points[index].x);
            self.place(Axis::X, index, x);
        }
        let y = self.limits.sanitize(proposed_y, self.points[index].y);
        self.place(Axis::Y, index, y);

        if self.points != before {
            self.notify();
        }
        Some(self.points[index])
    }

    pub fn end_drag(&mut self) {
        self.active = None;
    }

    /// Linear interpolation of the curve at `x`.
    ///
    /// Left of the first point yields its y, right of the last point yields
    /// its y. NaN yields the first y.
    pub fn value_at(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if !(x > first.x) {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            if x == b.x {
                return b.y;
            }
            if x < b.x {
                let t = (x - a.x) / (b.x - a.x);
                return a.y + t * (b.y - a.y);
            }
        }
        last.y
    }

    fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index == self.points.len() - 1
    }

    fn notify(&mut self) {
        let points = &self.points;
        for observer in self.observers.iter_mut() {
            observer.curve_changed(points);
        }
    }

    /// Set one axis of `index` to `target`, then repair its neighbours.
    fn place(&mut self, axis: Axis, index: usize, target: f64) {
        let n = self.points.len();
        let last = n - 1;
        // x is bounded by the locked endpoints, y by the domain
        let (lo, hi) = match axis {
            Axis::X => (self.points[0].x, self.points[last].x),
            Axis::Y => (self.limits.min, self.limits.max),
        };
        let sep = self.limits.effective_separation(lo, hi, n);
        // Range for point i that still leaves room for every other point
        let window = |i: usize| {
            (
                (lo + i as f64 * sep).min(hi),
                (hi - (last - i) as f64 * sep).max(lo),
            )
        };

        let mut value = target;
        if index > 0 && index < last {
            let lower = axis.get(&self.points[index - 1]) + sep;
            let upper = axis.get(&self.points[index + 1]) - sep;
            value = pin(value, lower, upper);
        }
        let (w_lo, w_hi) = window(index);
        value = pin(value, w_lo, w_hi);
        axis.set(&mut self.points[index], value);

        for i in index + 1..n {
            let prev = axis.get(&self.points[i - 1]);
            if axis.get(&self.points[i]) <= prev {
                axis.set(&mut self.points[i], (prev + sep).min(window(i).1));
            }
        }
        for i in (0..index).rev() {
            let next = axis.get(&self.points[i + 1]);
            if axis.get(&self.points[i]) >= next {
                axis.set(&mut self.points[i], (next - sep).max(window(i).0));
            }
        }
    }
}

pub fn validate_seed(points: &[ControlPoint], limits: &CurveLimits) -> Result<()> {
    if points.len() < 2 {
        return Err(CurveError::invalid_seed(format!(
            "curve needs at least 2 points, got {}",
            points.len()
        )));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(CurveError::invalid_seed(format!("point {} is not finite", i)));
        }
        if !limits.contains(p.x) || !limits.contains(p.y) {
            return Err(CurveError::invalid_seed(format!(
                "point {} ({}, {}) outside [{}, {}]",
                i, p.x, p.y, limits.min, limits.max
            )));
        }
    }
    for (i, w) in points.windows(2).enumerate() {
        if w[1].x <= w[0].x {
            return Err(CurveError::invalid_seed(format!(
                "x must be strictly increasing (point {} at {} after {})",
                i + 1,
                w[1].x,
                w[0].x
            )));
        }
        if w[1].y <= w[0].y {
            return Err(CurveError::invalid_seed(format!(
                "y must be strictly increasing (point {} at {} after {})",
                i + 1,
                w[1].y,
                w[0].y
            )));
        }
    }
    Ok(())
}

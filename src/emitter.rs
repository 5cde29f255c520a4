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

//! Piecewise-linear evaluator emitter
//!
//! Turns a point list into C source: one `if`/`else if` clause per segment,
//! each returning `slope * x + intercept`, and a final `else return x;`.

use serde::Serialize;

use crate::curves::ControlPoint;
use crate::error::{CurveError, Result};

pub const DEFAULT_FUNCTION_NAME: &str = "evaluatePiecewiseLinear";

const INDENT: &str = "    ";

/// Line through two adjacent control points
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PiecewiseSegment {
    pub index: usize,
    pub start_x: f64,
    pub end_x: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl PiecewiseSegment {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Slope and intercept for every adjacent pair of points
pub fn segments(points: &[ControlPoint]) -> Result<Vec<PiecewiseSegment>> {
    if points.len() < 2 {
        return Err(CurveError::invalid_seed(format!(
            "need at least 2 points to emit a curve, got {}",
            points.len()
        )));
    }
    points
        .windows(2)
        .enumerate()
        .map(|(index, w)| {
            let (a, b) = (w[0], w[1]);
            let dx = b.x - a.x;
            if dx == 0.0 {
                return Err(CurveError::DegenerateSegment { index, x: a.x });
            }
            let slope = (b.y - a.y) / dx;
            Ok(PiecewiseSegment {
                index,
                start_x: a.x,
                end_x: b.x,
                slope,
                intercept: a.y - slope * a.x,
            })
        })
        .collect()
}

/// Function body clauses, without braces or indentation
pub fn emit(points: &[ControlPoint]) -> Result<Vec<String>> {
    let mut lines: Vec<String> = segments(points)?
        .iter()
        .map(|seg| {
            let keyword = if seg.index == 0 { "if" } else { "else if" };
            format!(
                "{} (x <= {}) return {} * x + {};",
                keyword,
                literal(seg.end_x),
                literal(seg.slope),
                literal(seg.intercept)
            )
        })
        .collect();
    // Past the last control point the curve falls back to identity
    lines.push("else return x;".to_string());
    Ok(lines)
}

/// Complete C function `double <name>(double x) { ... }`
pub fn emit_function(name: &str, points: &[ControlPoint]) -> Result<Vec<String>> {
    let body = emit(points)?;
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("double {}(double x) {{", name));
    lines.extend(body.into_iter().map(|l| format!("{}{}", INDENT, l)));
    lines.push("}".to_string());
    Ok(lines)
}

fn literal(v: f64) -> String {
    let s = format!("{:.6}", v);
    if s == "-0.000000" {
        "0.000000".to_string()
    } else {
        s
    }
}

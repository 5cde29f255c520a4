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

use std::fmt;
use std::str::FromStr;

use crate::error::CurveError;

/// One complete drag: move point `index` towards `(x, y)` in domain units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragCommand {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for DragCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.index, self.x, self.y)
    }
}

impl FromStr for DragCommand {
    type Err = CurveError;

    /// Parses `INDEX:X,Y`, e.g. `2:40,55.5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CurveError::InvalidCommand {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (index, coords) = s.split_once(':').ok_or_else(|| invalid("expected INDEX:X,Y"))?;
        let (x, y) = coords.split_once(',').ok_or_else(|| invalid("expected X,Y after ':'"))?;

        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("index must be a non-negative integer"))?;
        let x = parse_coord(x).ok_or_else(|| invalid("x is not a finite number"))?;
        let y = parse_coord(y).ok_or_else(|| invalid("y is not a finite number"))?;
        Ok(Self { index, x, y })
    }
}

fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let cmd: DragCommand = "2:40,55.5".parse().unwrap();
        assert_eq!(cmd, DragCommand { index: 2, x: 40.0, y: 55.5 });

        let cmd: DragCommand = " 0 : -10 , 1e2 ".parse().unwrap();
        assert_eq!(cmd, DragCommand { index: 0, x: -10.0, y: 100.0 });
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "2", "2:40", "x:1,2", "-1:1,2", "1:a,2", "1:2,NaN", "1:inf,2"] {
            let err = input.parse::<DragCommand>().unwrap_err();
            assert!(matches!(err, CurveError::InvalidCommand { .. }), "{:?}", input);
        }
    }

    #[test]
    fn test_display() {
        let cmd = DragCommand { index: 1, x: 20.0, y: 42.5 };
        assert_eq!(cmd.to_string(), "1:20,42.5");
    }
}

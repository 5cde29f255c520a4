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

//! Editing session driven from the command line
//!
//! Plays the role of the presentation layer: it turns drag commands into
//! `begin_drag`/`update_drag`/`end_drag` calls and asks the emitter for the
//! exported function.

use std::io::Write;

use serde_json::json;

use crate::config::EditorConfig;
use crate::curves::{ControlPoint, CurveModel, CurveObserver};
use crate::emitter;
use crate::error::Result;
use crate::logger;
use crate::script::DragCommand;

pub struct App {
    pub config: EditorConfig,
    pub model: CurveModel,
    /// Forward session events to the JSON log
    pub log_events: bool,
}

impl App {
    pub fn new(config: EditorConfig) -> Result<Self> {
        let model = config.build_model()?;
        Ok(Self {
            config,
            model,
            log_events: false,
        })
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn CurveObserver>) {
        self.model.subscribe(observer);
    }

    fn log(&self, event: &str, data: serde_json::Value) {
        if self.log_events {
            logger::log_event(event, data);
        }
    }

    /// Run one full drag session and return where the point ended up
    pub fn apply(&mut self, cmd: &DragCommand) -> Result<ControlPoint> {
        self.model.begin_drag(cmd.index)?;
        self.log("drag_begin", json!({ "index": cmd.index }));

        let accepted = self.model.update_drag(cmd.x, cmd.y);
        self.model.end_drag();

        // begin_drag succeeded, so a drag was active
        let point = accepted.unwrap_or(self.model.points()[cmd.index]);
        self.log(
            "drag_end",
            json!({
                "index": cmd.index,
                "proposed": { "x": cmd.x, "y": cmd.y },
                "accepted": { "x": point.x, "y": point.y },
            }),
        );
        Ok(point)
    }

    /// Apply commands in order, stopping at the first failure
    pub fn run_script(&mut self, commands: &[DragCommand]) -> Result<()> {
        for cmd in commands {
            if let Err(e) = self.apply(cmd) {
                self.log("drag_rejected", json!({ "command": cmd.to_string(), "error": e.to_string() }));
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn sample(&self, x: f64) -> f64 {
        self.model.value_at(x)
    }

    pub fn export_lines(&self) -> Result<Vec<String>> {
        let lines = emitter::emit_function(&self.config.function_name, self.model.points())?;
        if self.log_events {
            let segments = emitter::segments(self.model.points())?;
            self.log(
                "export",
                json!({
                    "function": self.config.function_name,
                    "points": self.model.points(),
                    "segments": segments,
                }),
            );
        }
        Ok(lines)
    }

    pub fn print_curve_representation<W: Write>(&self, out: &mut W) -> Result<()> {
        let lines = self.export_lines()?;
        writeln!(out, "C Representation:")?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

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

//! Opt-in JSON-lines event log. Nothing is written until [`init_logging`].

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::config::config_path;

const FALLBACK_LOG_PATH: &str = "/tmp/actuation_curve_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// `logs.json` next to the config file
pub fn default_log_path() -> PathBuf {
    config_path().with_file_name("logs.json")
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Start logging to `path` (or [`default_log_path`]).
///
/// Falls back to `/tmp` when the target cannot be opened. Returns the path
/// actually in use.
pub fn init_logging(path: Option<&Path>) -> Option<PathBuf> {
    let target = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let (file, used) = match open_append(&target) {
        Some(f) => (f, target),
        None => {
            let fallback = PathBuf::from(FALLBACK_LOG_PATH);
            (open_append(&fallback)?, fallback)
        }
    };
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    Some(used)
}

pub fn shutdown_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

pub fn log_event(event: &str, data: Value) {
    let Ok(mut guard) = LOG_FILE.lock() else { return };
    let Some(f) = guard.as_mut() else { return };
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();
    let _ = writeln!(f, "{}", line);
}

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

use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::curves::{
    validate_seed, ControlPoint, CurveLimits, CurveModel, DEFAULT_DOMAIN_MAX, DEFAULT_DOMAIN_MIN,
    DEFAULT_MIN_SEPARATION, DEFAULT_SEED,
};
use crate::emitter::DEFAULT_FUNCTION_NAME;
use crate::error::{CurveError, Result};

pub const MAX_POINTS: usize = 32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    #[serde(default = "default_version")]
    pub version: u8,
    /// Seed control points, ordered by travel
    #[serde(default = "default_points")]
    pub points: Vec<ControlPoint>,
    #[serde(default = "default_domain_min")]
    pub domain_min: f64,
    #[serde(default = "default_domain_max")]
    pub domain_max: f64,
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,
    #[serde(default)]
    pub snap_to_integer: bool,
    /// Name of the emitted C function
    #[serde(default = "default_function_name")]
    pub function_name: String,
}

fn default_version() -> u8 { 1 }
fn default_points() -> Vec<ControlPoint> { DEFAULT_SEED.iter().copied().map(ControlPoint::from).collect() }
fn default_domain_min() -> f64 { DEFAULT_DOMAIN_MIN }
fn default_domain_max() -> f64 { DEFAULT_DOMAIN_MAX }
fn default_min_separation() -> f64 { DEFAULT_MIN_SEPARATION }
fn default_function_name() -> String { DEFAULT_FUNCTION_NAME.to_string() }

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            points: default_points(),
            domain_min: default_domain_min(),
            domain_max: default_domain_max(),
            min_separation: default_min_separation(),
            snap_to_integer: false,
            function_name: default_function_name(),
        }
    }
}

impl EditorConfig {
    pub fn limits(&self) -> CurveLimits {
        CurveLimits {
            min: self.domain_min,
            max: self.domain_max,
            min_separation: self.min_separation,
            snap_to_integer: self.snap_to_integer,
        }
    }

    pub fn build_model(&self) -> Result<CurveModel> {
        CurveModel::new(self.points.iter().copied(), self.limits())
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("actuation-curve").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("actuation-curve")
            .join("config.json");
    }
    PathBuf::from("/etc/actuation-curve/config.json")
}

pub fn load_config_from(path: &Path) -> Result<EditorConfig> {
    let data = fs::read_to_string(path).map_err(|source| CurveError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: EditorConfig = serde_json::from_str(&data)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Config from [`config_path`], or None if it is missing or invalid
pub fn load_config() -> Option<EditorConfig> {
    load_config_from(&config_path()).ok()
}

pub fn write_config(path: &Path, cfg: &EditorConfig) -> Result<()> {
    validate_config(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CurveError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json).map_err(|source| CurveError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    // Best-effort set permissions to 0644
    let perms = fs::Permissions::from_mode(0o644);
    let _ = fs::set_permissions(path, perms);
    Ok(())
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 64 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_config(cfg: &EditorConfig) -> Result<()> {
    if cfg.version == 0 {
        return Err(CurveError::invalid_config("version", "must be >= 1"));
    }
    if cfg.points.len() > MAX_POINTS {
        return Err(CurveError::invalid_config(
            "points",
            format!("too many points (max {})", MAX_POINTS),
        ));
    }
    if !is_c_identifier(&cfg.function_name) {
        return Err(CurveError::invalid_config(
            "function_name",
            format!("'{}' is not a C identifier", cfg.function_name),
        ));
    }
    let limits = cfg.limits();
    limits.validate()?;
    validate_seed(&cfg.points, &limits)
}

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

use std::fs;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

use actuation_curve::app::App;
use actuation_curve::config::{config_path, load_config_from, write_config, EditorConfig};
use actuation_curve::logger;
use actuation_curve::script::DragCommand;

const USAGE: &str = "\
usage: actuation-curve [init] [--config PATH] [--drag INDEX:X,Y]... [--at X]...
                       [--output PATH] [--logging]

  init              write the default config and exit
  --config PATH     config file (default: $XDG_CONFIG_HOME/actuation-curve/config.json)
  --drag I:X,Y      drag point I towards (X, Y); may repeat, applied in order
  --at X            print the curve value at travel X; may repeat
  --output PATH     write the C function to PATH instead of stdout
  --logging         append session events to logs.json next to the config";

#[derive(Debug, Default)]
struct Args {
    init: bool,
    config: Option<PathBuf>,
    drags: Vec<DragCommand>,
    samples: Vec<f64>,
    output: Option<PathBuf>,
    logging: bool,
}

fn parse_args(raw: &[String]) -> anyhow::Result<Option<Args>> {
    let mut args = Args::default();
    let mut it = raw.iter().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} needs a value", flag))
        };
        match arg.as_str() {
            "init" => args.init = true,
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--drag" => args.drags.push(value("--drag")?.parse()?),
            "--at" => {
                let raw = value("--at")?;
                let x = raw
                    .parse::<f64>()
                    .with_context(|| format!("--at expects a number, got '{}'", raw))?;
                args.samples.push(x);
            }
            "--output" => args.output = Some(PathBuf::from(value("--output")?)),
            "--logging" => args.logging = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(anyhow!("unknown argument '{}'\n\n{}", other, USAGE)),
        }
    }
    Ok(Some(args))
}

fn main() -> anyhow::Result<()> {
    let raw: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&raw)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let path = args.config.clone().unwrap_or_else(config_path);

    if args.logging {
        let log_path = args.config.as_ref().map(|p| p.with_file_name("logs.json"));
        logger::init_logging(log_path.as_deref());
        logger::log_event("startup", serde_json::json!({ "args": raw }));
    }

    if args.init {
        write_config(&path, &EditorConfig::default())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = if path.exists() {
        load_config_from(&path).with_context(|| format!("loading {}", path.display()))?
    } else {
        EditorConfig::default()
    };

    let mut app = App::new(config)?.with_logging(args.logging);
    app.run_script(&args.drags)?;

    match &args.output {
        Some(out) => {
            let mut text = app.export_lines()?.join("\n");
            text.push('\n');
            fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} to {}", app.config.function_name, out.display());
        }
        None => app.print_curve_representation(&mut stdout())?,
    }

    for x in &args.samples {
        println!("f({}) = {:.6}", x, app.sample(*x));
    }

    if args.logging {
        logger::shutdown_logging();
    }
    Ok(())
}

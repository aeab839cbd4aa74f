// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room layout resolver.
//!
//! Reads a JSON room description, lays the room out and prints the resolved
//! walls, openings, segments and panels as JSON on stdout. Logs go to
//! stderr.
//!
//! Usage:
//!   room-layout [<description.json> | -] [--output <path>]
//!
//! Environment:
//!   RUST_LOG       log filter (default `info,interior_layout=debug`)
//!   LOG_FORMAT     `json` for JSON logs
//!   OUTPUT_PRETTY  `0` for compact output

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Read, Write};

mod config;
mod description;

use config::{Config, LogFormat};
use description::RoomDescription;

fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    let args: Vec<String> = env::args().collect();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--output" | "-o" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    bail!("--output needs a path");
                };
                output = Some(path.clone());
            }
            other if input.is_none() => input = Some(other.to_string()),
            other => bail!("unexpected argument: {other}"),
        }
        i += 1;
    }

    let text = match input.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read description from stdin")?;
            text
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?,
    };

    let report = RoomDescription::from_json(&text)?.resolve()?;
    let json = if config.pretty_output {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("failed to write {path}"))?;
            tracing::info!(%path, "wrote layout");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: room-layout [<description.json> | -] [--output <path>]");
    eprintln!();
    eprintln!("Reads a room description (JSON) and prints the resolved layout (JSON).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG       log filter (default: info,interior_layout=debug)");
    eprintln!("  LOG_FORMAT     'json' for JSON logs");
    eprintln!("  OUTPUT_PRETTY  '0' for compact output");
}

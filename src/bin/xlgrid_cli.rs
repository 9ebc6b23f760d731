//! CLI tool for xlgrid - renders a grid data bundle headlessly
//!
//! Usage:
//!   xlgrid_cli <data.json>                       # Print the frame's draw commands
//!   xlgrid_cli <data.json> --config config.json  # Use a custom grid config
//!   xlgrid_cli <data.json> --locate 130,40       # Print the cell under a point
//!   xlgrid_cli <data.json> -o frame.json         # Write output to file
//!
//! Set `RUST_LOG=xlgrid=debug` to see engine logging on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use xlgrid::config::GridConfig;
use xlgrid::engine::GridEngine;
use xlgrid::render::RecordingSurface;

const USAGE: &str =
    "Usage: xlgrid_cli <data.json> [--config config.json] [--locate x,y] [-o output.json]";

struct Args {
    input_path: String,
    config_path: Option<String>,
    locate: Option<(f64, f64)>,
    output_path: Option<String>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_point(s: &str) -> Option<(f64, f64)> {
    let (x, y) = s.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_args() -> Args {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        input_path: String::new(),
        config_path: None,
        locate: None,
        output_path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config_path = Some(args.next().unwrap_or_else(|| fail(USAGE))),
            "--locate" => {
                let point = args.next().unwrap_or_else(|| fail(USAGE));
                parsed.locate = Some(
                    parse_point(&point)
                        .unwrap_or_else(|| fail(&format!("Invalid point: {point}"))),
                );
            }
            "-o" => parsed.output_path = Some(args.next().unwrap_or_else(|| fail(USAGE))),
            _ if parsed.input_path.is_empty() => parsed.input_path = arg,
            _ => fail(USAGE),
        }
    }

    if parsed.input_path.is_empty() {
        fail(USAGE);
    }
    parsed
}

fn read(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error reading {path}: {e}")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args();

    let config = match args.config_path {
        Some(ref path) => match GridConfig::from_json(&read(path)) {
            Ok(c) => c,
            Err(e) => fail(&format!("Error in config {path}: {e}")),
        },
        None => GridConfig::default(),
    };

    let mut engine = match GridEngine::new(RecordingSurface::default(), config) {
        Ok(engine) => engine,
        Err(e) => fail(&format!("Error creating grid: {e}")),
    };

    // Loading renders the first frame
    if let Err(e) = engine.load_json(&read(&args.input_path)) {
        fail(&format!("Error loading {}: {e}", args.input_path));
    }

    let json = match args.locate {
        Some((x, y)) => serde_json::to_string_pretty(&engine.locate(x, y)),
        None => serde_json::to_string_pretty(engine.surface().last_frame()),
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match args.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

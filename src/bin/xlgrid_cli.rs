//! CLI tool for xlgrid - lays out a canvas JSON file and outputs the grid report as JSON
//!
//! Usage:
//!   xlgrid_cli <canvas.json>                      # Output JSON to stdout
//!   xlgrid_cli <canvas.json> -o out.json          # Output JSON to file
//!   xlgrid_cli <canvas.json> --xls                # Use XLS row/column limits
//!   xlgrid_cli <canvas.json> --rows-per-page 5000 # Paginate tables

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use xlgrid::export::export_json;
use xlgrid::{ExportConfig, SpreadsheetFormat};

const USAGE: &str =
    "Usage: xlgrid_cli <canvas.json> [-o output.json] [--xls] [--rows-per-page N]";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path = None;
    let mut format = SpreadsheetFormat::Xlsx;
    let mut rows_per_page = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--xls" => format = SpreadsheetFormat::Xls,
            "--rows-per-page" if i + 1 < args.len() => {
                match args[i + 1].parse::<u32>() {
                    Ok(n) => rows_per_page = Some(n),
                    Err(e) => {
                        eprintln!("Invalid --rows-per-page {}: {}", args[i + 1], e);
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {other}\n{USAGE}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let mut config = ExportConfig::for_format(format);
    config.rows_per_page = rows_per_page;

    // Lay out and serialize
    let json = match export_json(&data, &config) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error exporting {}: {}", input_path, e);
            if e.is_capacity_exceeded() {
                eprintln!("Hint: retry with a smaller --rows-per-page window");
            }
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

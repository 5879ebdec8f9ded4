//! CLI tool for canvasgrid - lays out a grid document and outputs JSON
//!
//! Usage:
//!   canvasgrid_cli <document.json>              # Output layout JSON to stdout
//!   canvasgrid_cli <document.json> -o out.json  # Output layout JSON to file
//!
//! Text widths come from a monospace approximation (0.6em per character).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::io::{self, Write};

use canvasgrid::document::GridDocument;
use canvasgrid::render::MonospaceTextMeasurer;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: canvasgrid_cli <document.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    let document = match GridDocument::from_path(input_path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error loading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let report = document.layout(MonospaceTextMeasurer::default());

    match output_path {
        Some(path) => {
            if let Err(e) = report.write_to(path) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!(
                "Written: {} ({} headers, {} cells)",
                path,
                report.headers.len(),
                report.rows.len()
            );
        }
        None => {
            let json = match report.to_json_pretty() {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error serializing JSON: {}", e);
                    std::process::exit(1);
                }
            };
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

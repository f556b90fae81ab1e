mod render;
mod session;

use catalog::CourseGraph;
use datafetcher::catalog_csv::read_rows;
use log::{info, warn};
use std::{env, path::Path, process};

fn main() {
    env_logger::init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: explorer <courses.csv> [more.csv ...]");
        process::exit(2);
    }

    let mut graph = CourseGraph::new();
    for path in &paths {
        let rows = match read_rows(Path::new(path)) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };

        info!("Loaded {} rows from {path}", rows.len());
        for failure in graph.ingest_rows(&rows) {
            warn!("{path}: {failure}");
        }
    }

    info!("Catalog ready with {} courses", graph.len());
    println!("Type 'help' for the command list.");

    session::run(&graph);
}

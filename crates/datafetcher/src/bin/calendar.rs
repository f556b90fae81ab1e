use datafetcher::{
    calendar::extract_rows,
    catalog_csv::write_rows,
    subjects::Subject,
    util::{DEFAULT_OUTPUT_DIR, ensure_dir},
};
use futures::future::join_all;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use reqwest::Client;
use std::{fs, path::Path};

/// Output file names
const CSV_FILE: &str = "courses.csv";
const JSON_FILE: &str = "courses.json";

/// Orchestrates the scraping of calendar course pages
#[tokio::main]
async fn main() {
    ensure_dir(DEFAULT_OUTPUT_DIR).unwrap();

    let client = Client::new();

    // Build futures for downloading each subject's page
    let futures = Subject::all().into_iter().map(|subject| {
        let client = client.clone();
        async move {
            let html = client
                .get(subject.page_url())
                .send()
                .await
                .expect("Request failed")
                .text()
                .await
                .expect("Failed to read body");

            (subject, html)
        }
    });

    // Download all in parallel
    let downloaded: Vec<(Subject, String)> = join_all(futures).await;

    // Do extraction in parallel
    let rows = downloaded
        .into_par_iter()
        .map(|(subject, html)| extract_rows(subject, &html))
        .flatten()
        .collect::<Vec<_>>();

    println!("Extracted {} courses", rows.len());

    let csv_path = Path::new(DEFAULT_OUTPUT_DIR).join(CSV_FILE);
    write_rows(&csv_path, &rows).expect("Failed to write CSV output");

    let json = serde_json::to_string_pretty(&rows).expect("Failed to serialize rows");
    let json_path = Path::new(DEFAULT_OUTPUT_DIR).join(JSON_FILE);
    fs::write(json_path, json).expect("Failed to write JSON output");
}

use crate::subjects::Subject;
use crate::util::collapse_whitespace;
use catalog::CatalogRow;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    static ref COURSE_BLOCK: Selector = Selector::parse("div.views-row").unwrap();
    static ref BLOCK_HEADER: Selector =
        Selector::parse("h3.js-views-accordion-group-header").unwrap();
    static ref COURSE_CODE: Regex = Regex::new(r"[A-Z]{3}\d{3}[HY]\d").unwrap();
    static ref PREREQUISITE_FIELD: Regex = Regex::new(r"(?s)Prerequisite(.*?)</span>").unwrap();
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Extracts catalog rows from one subject page of the calendar
///
/// # Arguments
/// * `subject` - The calendar section the page belongs to
/// * `html` - The raw page HTML
///
/// # Returns
/// A clean row for every course block carrying a recognizable course code;
/// blocks without one are skipped with a diagnostic line
pub fn extract_rows(subject: Subject, html: &str) -> Vec<CatalogRow> {
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    for block in document.select(&COURSE_BLOCK) {
        // Rows without an accordion header are pagers and section blurbs
        let Some(header) = block.select(&BLOCK_HEADER).next() else {
            continue;
        };
        let header_text = header.text().collect::<String>();

        let Some((code, keywords)) = split_header(&header_text) else {
            eprintln!(
                "Skipping {} block without a course code: {}",
                subject.section_slug(),
                collapse_whitespace(&header_text)
            );
            continue;
        };

        rows.push(CatalogRow {
            code,
            keywords,
            prerequisites: prerequisite_text(&block.html()),
        });
    }

    rows
}

/// Splits a block header like `CSC111H1 - Foundations of Computer Science`
/// into the course code and its title keywords
fn split_header(header: &str) -> Option<(String, String)> {
    let code = COURSE_CODE.find(header)?;
    let title = header[code.end()..]
        .trim_start()
        .trim_start_matches('-')
        .trim_start();

    Some((code.as_str().to_string(), collapse_whitespace(title)))
}

/// Pulls the prerequisite field out of one course block's HTML; courses
/// without the field yield an empty string
fn prerequisite_text(block_html: &str) -> String {
    match PREREQUISITE_FIELD.captures(block_html) {
        Some(captures) => cleanup_field(&captures[1]),
        None => String::new(),
    }
}

/// Strips markup remnants from an extracted field: tags go, semicolons
/// become commas, whitespace collapses
fn cleanup_field(raw: &str) -> String {
    let stripped = MARKUP_TAG.replace_all(raw, "");
    let stripped = stripped.replace(';', ",");
    collapse_whitespace(stripped.trim().trim_start_matches(':'))
}

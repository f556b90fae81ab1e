use crate::render;
use catalog::{CatalogError, CourseGraph};
use models::course::year_level;
use models::requisite::{DEFAULT_MIN_GRADE, Requisite};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    io::{self, Write},
};

/// Grade assumed for completions entered without one
const ASSUMED_GRADE: u8 = 100;

enum Outcome {
    Reply(String),
    Quit,
}

/// Reads commands from stdin until quit or end of input
pub fn run(graph: &CourseGraph) {
    let stdin = io::stdin();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                break;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        match execute(graph, &line) {
            Outcome::Reply(reply) => println!("{reply}"),
            Outcome::Quit => break,
        }
    }
}

fn execute(graph: &CourseGraph, line: &str) -> Outcome {
    let trimmed = line.trim();
    let (command, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (trimmed, ""),
    };

    let reply = match command {
        "keyword" => keyword_report(graph, argument),
        "cost" => cost_report(graph, argument),
        "prereqs" => prereqs_report(graph, argument),
        "next" => next_report(graph, argument),
        "dot" => dot_report(graph, argument),
        "help" => help_text(),
        "quit" | "exit" => return Outcome::Quit,
        _ => format!("Unknown command '{command}'. Type 'help' for the command list."),
    };

    Outcome::Reply(reply)
}

fn keyword_report(graph: &CourseGraph, term: &str) -> String {
    if term.is_empty() {
        return "Usage: keyword <term>".to_string();
    }

    let mut matches = graph.find_by_keyword(term);
    if matches.is_empty() {
        return format!("No courses match '{term}'");
    }
    matches.sort();

    matches
        .iter()
        .map(|code| recommendation(graph, code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One keyword match: title line, cheapest total, and the chain grouped
/// by year level
fn recommendation(graph: &CourseGraph, code: &str) -> String {
    let mut lines = match graph.lookup(code) {
        Some(course) if !course.keywords().is_empty() => {
            vec![format!("{code} - {}", course.keywords())]
        }
        _ => vec![code.to_string()],
    };

    match graph.min_cost(code) {
        Ok((cost, required)) => {
            lines.push(format!("  total: {cost} credits"));
            if required.is_empty() {
                lines.push("  no prerequisites needed".to_string());
            } else {
                for (year, codes) in group_by_year(&required) {
                    lines.push(format!("  year {year}: {}", codes.join(", ")));
                }
            }
        }
        Err(e) => lines.push(format!("  {e}")),
    }

    lines.join("\n")
}

fn group_by_year(codes: &BTreeSet<String>) -> BTreeMap<u32, Vec<String>> {
    let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for code in codes {
        groups
            .entry(year_level(code).unwrap_or(0))
            .or_default()
            .push(code.clone());
    }

    groups
}

fn cost_report(graph: &CourseGraph, code: &str) -> String {
    if code.is_empty() {
        return "Usage: cost <code>".to_string();
    }

    let Some(course) = graph.lookup(code) else {
        return CatalogError::UnknownCourse {
            code: code.to_string(),
        }
        .to_string();
    };

    match graph.min_cost(code) {
        Ok((cost, required)) if required.is_empty() => {
            format!(
                "{code}: {} course, {cost} credits, no prerequisites",
                course.duration()
            )
        }
        Ok((cost, required)) => format!(
            "{code}: {} course, {cost} credits\n  requires: {}",
            course.duration(),
            join_codes(&required)
        ),
        Err(e) => e.to_string(),
    }
}

fn prereqs_report(graph: &CourseGraph, code: &str) -> String {
    if code.is_empty() {
        return "Usage: prereqs <code>".to_string();
    }

    match graph.all_prerequisites(code) {
        Ok(closure) if closure.is_empty() => format!("{code} has no prerequisites"),
        Ok(closure) => format!("{code} builds on: {}", join_codes(&closure)),
        Err(e) => e.to_string(),
    }
}

fn next_report(graph: &CourseGraph, argument: &str) -> String {
    let completed = match parse_completed(argument) {
        Ok(completed) => completed,
        Err(message) => return message,
    };

    let codes: Vec<String> = completed.iter().map(|(code, _)| code.clone()).collect();
    let grades: HashMap<String, u8> = completed.into_iter().collect();

    match graph.unlocked_by(&codes) {
        Ok(unlocked) if unlocked.is_empty() => "Nothing new is unlocked".to_string(),
        Ok(unlocked) => {
            let mut lines = vec![format!("Unlocked by {}:", codes.join(", "))];
            for code in &unlocked {
                let Some(course) = graph.lookup(code) else {
                    continue;
                };
                let status = match course.requisite().simplify(&grades) {
                    None => "ready to take".to_string(),
                    Some(remaining) => format!("still needs {}", describe_requisite(&remaining)),
                };
                lines.push(format!("  {code}: {status}"));
            }
            lines.join("\n")
        }
        Err(e) => e.to_string(),
    }
}

/// Parses `next` input of the form `CODE[=GRADE],CODE,...`
fn parse_completed(argument: &str) -> Result<Vec<(String, u8)>, String> {
    let mut completed = Vec::new();
    for part in argument.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            Some((code, grade)) => {
                let grade = grade
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid grade in '{part}'"))?;
                completed.push((code.trim().to_string(), grade));
            }
            None => completed.push((part.to_string(), ASSUMED_GRADE)),
        }
    }

    if completed.is_empty() {
        return Err("Usage: next <code[=grade],code,...>".to_string());
    }

    Ok(completed)
}

fn dot_report(graph: &CourseGraph, argument: &str) -> String {
    let (code, file) = match argument.split_once(char::is_whitespace) {
        Some((code, file)) => (code, Some(file.trim())),
        None => (argument, None),
    };

    // Without a course the whole catalog is rendered
    let dot = if code.is_empty() {
        render::dot_graph(graph)
    } else {
        match graph.all_prerequisites(code) {
            Ok(mut nodes) => {
                nodes.insert(code.to_string());
                render::dot_subgraph(graph, &nodes)
            }
            Err(e) => return e.to_string(),
        }
    };

    match file {
        Some(path) => match fs::write(path, &dot) {
            Ok(()) => format!("Wrote {path}"),
            Err(e) => format!("Failed to write '{path}': {e}"),
        },
        None => dot,
    }
}

/// Renders a requirement as readable text, spelling grades out only where
/// they differ from the default
fn describe_requisite(requisite: &Requisite) -> String {
    match requisite {
        Requisite::Course { code, min_grade } => {
            if *min_grade == DEFAULT_MIN_GRADE {
                code.clone()
            } else {
                format!("{min_grade}% in {code}")
            }
        }
        Requisite::All(children) if children.is_empty() => "nothing".to_string(),
        Requisite::All(children) => join_children(children, " and "),
        Requisite::Any(children) => join_children(children, " or "),
    }
}

fn join_children(children: &[Requisite], separator: &str) -> String {
    children
        .iter()
        .map(|child| match child {
            Requisite::Course { .. } => describe_requisite(child),
            _ => format!("({})", describe_requisite(child)),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn join_codes(codes: &BTreeSet<String>) -> String {
    codes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn help_text() -> String {
    [
        "Commands:",
        "  keyword <term>           courses matching a keyword, with their cheapest chains",
        "  cost <code>              minimum credits and courses needed before taking <code>",
        "  prereqs <code>           every course reachable through prerequisites",
        "  next <code[=grade],...>  what the given completed courses unlock",
        "  dot [code] [file]        Graphviz view of the catalog or one course's chain",
        "  quit",
    ]
    .join("\n")
}

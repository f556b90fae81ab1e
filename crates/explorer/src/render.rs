use catalog::CourseGraph;
use std::collections::BTreeSet;

/// Renders every course and unlock edge in the catalog as Graphviz DOT text
pub fn dot_graph(graph: &CourseGraph) -> String {
    let nodes: BTreeSet<String> = graph.course_codes().map(str::to_string).collect();
    dot_subgraph(graph, &nodes)
}

/// Renders the unlock edges among the given courses as Graphviz DOT text,
/// with edges pointing from prerequisite to dependent
pub fn dot_subgraph(graph: &CourseGraph, nodes: &BTreeSet<String>) -> String {
    let mut out = String::from("digraph prerequisites {\n  rankdir=LR;\n");

    for node in nodes {
        out.push_str(&format!("  \"{node}\";\n"));
    }
    for (from, to) in graph.unlock_edges_within(nodes) {
        out.push_str(&format!("  \"{from}\" -> \"{to}\";\n"));
    }
    out.push_str("}\n");

    out
}

//! Tests for the Mermaid renderer over hand-built graphs

use std::collections::BTreeSet;
use std::path::Path;

use pretty_assertions::assert_eq;
use uv_dep_graph::graph::{
    Bucket, BucketKind, DependencyGraph, Edge, MermaidRenderer, NodeMap, Package,
};
use uv_dep_graph::lockfile::LockSpecifiers;

fn graph(root: &str, packages: &[(&str, &str)], edges: &[(&str, &str)]) -> DependencyGraph {
    let mut nodes = NodeMap::new();
    for (name, version) in packages {
        nodes.insert(format!("{name}@{version}"), Package::new(*name, *version));
    }
    DependencyGraph::new(
        root,
        nodes,
        edges.iter().map(|(f, t)| Edge::new(*f, *t)).collect(),
    )
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// app → {httpx, click}, httpx → {idna, certifi}
fn web_app() -> DependencyGraph {
    graph(
        "app",
        &[
            ("app", "1.0.0"),
            ("httpx", "0.27.0"),
            ("click", "8.1.7"),
            ("idna", "3.7"),
            ("certifi", "2024.2.2"),
        ],
        &[
            ("app", "httpx"),
            ("app", "click"),
            ("httpx", "idna"),
            ("httpx", "certifi"),
        ],
    )
}

/// app → {click, pytest, openpyxl}, pytest → pluggy, with a test group and
/// an xlsx extra
fn bucketed_app() -> (DependencyGraph, Vec<Bucket>, Vec<Bucket>) {
    let graph = graph(
        "app",
        &[
            ("app", "1.0.0"),
            ("click", "8.1.7"),
            ("pytest", "8.2.0"),
            ("pluggy", "1.5.0"),
            ("openpyxl", "3.1.2"),
        ],
        &[
            ("app", "click"),
            ("app", "pytest"),
            ("pytest", "pluggy"),
            ("app", "openpyxl"),
        ],
    );
    let groups = vec![Bucket::new(
        BucketKind::Group,
        "test",
        names(&["pytest", "pluggy"]),
    )];
    let extras = vec![Bucket::new(BucketKind::Extra, "xlsx", names(&["openpyxl"]))];
    (graph, groups, extras)
}

#[test]
fn test_renders_primary_box_and_ordering() {
    let mermaid = MermaidRenderer::new().render_to_string(&web_app()).unwrap();

    let expected = r#"flowchart LR
    app[["app<br/>1.0.0"]]

    subgraph primary__box["Primary dependencies"]
        httpx{{"httpx<br/>0.27.0"}}
        click_0{{"click<br/>8.1.7"}}
    end

    certifi("certifi<br/>2024.2.2")
    idna("idna<br/>3.7")

    app ==> httpx
    app ==> click_0
    httpx --> certifi
    httpx --> idna

    click app "https://pypi.org/project/app/" _blank
    click httpx "https://pypi.org/project/httpx/" _blank
    click click_0 "https://pypi.org/project/click/" _blank
    click certifi "https://pypi.org/project/certifi/" _blank
    click idna "https://pypi.org/project/idna/" _blank

    style app stroke-width:3px
    style httpx stroke-width:3px
    style click_0 stroke-width:3px
    style primary__box fill:#E3F2FD,stroke:#1976D2
"#;
    assert_eq!(mermaid, expected);
}

#[test]
fn test_renders_bucket_boxes_with_dashed_links() {
    let (graph, groups, extras) = bucketed_app();
    let mermaid = MermaidRenderer::new()
        .with_groups(groups)
        .with_extras(extras)
        .render_to_string(&graph)
        .unwrap();

    let expected = r#"flowchart LR
    app[["app<br/>1.0.0"]]

    subgraph primary__box["Primary dependencies"]
        click_0{{"click<br/>8.1.7"}}
    end

    subgraph group__test["--group test"]
        pytest{{"pytest<br/>8.2.0"}}
        pluggy("pluggy<br/>1.5.0")
    end

    subgraph extra__xlsx["--extra xlsx"]
        openpyxl{{"openpyxl<br/>3.1.2"}}
    end

    app ==> click_0
    pytest --> pluggy
    app -.-> group__test
    app -.-> extra__xlsx

    click app "https://pypi.org/project/app/" _blank
    click click_0 "https://pypi.org/project/click/" _blank
    click pytest "https://pypi.org/project/pytest/" _blank
    click pluggy "https://pypi.org/project/pluggy/" _blank
    click openpyxl "https://pypi.org/project/openpyxl/" _blank

    style app stroke-width:3px
    style click_0 stroke-width:3px
    style primary__box fill:#E3F2FD,stroke:#1976D2
    style group__test fill:#E8F5E9,stroke:#43A047
    style extra__xlsx fill:#FFF3E0,stroke:#F57C00
"#;
    assert_eq!(mermaid, expected);
}

#[test]
fn test_specifiers_label_edges_and_bucket_members() {
    let lock = r#"
version = 1

[[package]]
name = "app"
version = "1.0.0"
source = { editable = "." }

[package.metadata]
requires-dist = [
    { name = "click", specifier = ">=8.1" },
    { name = "openpyxl", marker = "extra == 'xlsx'", specifier = "~=3.1" },
]

[package.metadata.requires-dev]
test = [{ name = "pytest", specifier = ">=8" }]
"#;
    let specifiers = LockSpecifiers::parse(Path::new("uv.lock"), lock.to_string()).unwrap();
    let (graph, groups, extras) = bucketed_app();
    let mermaid = MermaidRenderer::new()
        .with_groups(groups)
        .with_extras(extras)
        .with_specifiers(specifiers)
        .render_to_string(&graph)
        .unwrap();

    assert!(mermaid.contains(r##"    app ==>|"#gt;=8.1"| click_0"##));
    assert!(mermaid.contains(r#"pytest{{"pytest<br/>8.2.0<br/>#gt;=8"}}"#));
    assert!(mermaid.contains(r#"openpyxl{{"openpyxl<br/>3.1.2<br/>~=3.1"}}"#));
    assert!(mermaid.contains(r#"pluggy("pluggy<br/>1.5.0")"#));
}

#[test]
fn test_rendering_is_deterministic() {
    let (graph, groups, extras) = bucketed_app();
    let renderer = MermaidRenderer::new()
        .with_groups(groups)
        .with_extras(extras);

    let first = renderer.render_to_string(&graph).unwrap();
    let second = renderer.render_to_string(&graph).unwrap();
    assert_eq!(first, second);

    // Edge insertion order does not matter either
    let mut shuffled = graph.clone();
    shuffled.edges.reverse();
    assert_eq!(first, renderer.render_to_string(&shuffled).unwrap());
}

#[test]
fn test_root_only_graph_has_no_sections() {
    let graph = graph("app", &[("app", "1.0.0")], &[]);
    let mermaid = MermaidRenderer::new().render_to_string(&graph).unwrap();

    assert_eq!(
        mermaid,
        "flowchart LR\n    app[[\"app<br/>1.0.0\"]]\n\n    click app \"https://pypi.org/project/app/\" _blank\n\n    style app stroke-width:3px\n"
    );
}

#[test]
fn test_depth_one_trim_renders_direct_dependencies_only() {
    let graph = graph(
        "app",
        &[("app", "1.0"), ("dep-a", "1.0"), ("dep-b", "1.0")],
        &[("app", "dep-a"), ("dep-a", "dep-b")],
    );
    let trimmed = graph.trim_to_depth(1);
    assert_eq!(trimmed.names(), BTreeSet::from(["app", "dep-a"]));

    let mermaid = MermaidRenderer::new().render_to_string(&trimmed).unwrap();
    assert!(mermaid.contains("    app ==> dep_a\n"));
    assert!(!mermaid.contains("dep_b"));
}

#[test]
fn test_labels_are_escaped() {
    let graph = graph(
        "app",
        &[("app", "1.0"), ("weird", "1.0\"<beta>")],
        &[("app", "weird")],
    );
    let mermaid = MermaidRenderer::new().render_to_string(&graph).unwrap();
    assert!(mermaid.contains(r#"weird{{"weird<br/>1.0#quot;#lt;beta#gt;"}}"#));
}

#[test]
fn test_render_into_writer() {
    let mut buffer = Vec::new();
    MermaidRenderer::new()
        .render_mermaid(&web_app(), &mut buffer)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("flowchart LR\n"));
    assert!(text.ends_with("style primary__box fill:#E3F2FD,stroke:#1976D2\n"));
}

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use miette::Result;

use super::metrics::LayoutMetrics;
use super::types::{Bucket, BucketKind, DependencyGraph, Package};
use crate::constants::render::PYPI_PROJECT_URL;
use crate::error::DepGraphError;
use crate::lockfile::LockSpecifiers;

// Blue-Orange Accessible Palette, plus green for dependency groups
mod styles {
    pub const THICK_BORDER: &str = "stroke-width:3px";
    pub const PRIMARY_BOX: &str = "fill:#E3F2FD,stroke:#1976D2"; // Light blue / medium blue
    pub const EXTRA_BOX: &str = "fill:#FFF3E0,stroke:#F57C00"; // Light orange / vibrant orange
    pub const GROUP_BOX: &str = "fill:#E8F5E9,stroke:#43A047"; // Light green / green
}

const PRIMARY_BOX_ID: &str = "primary__box";
const PRIMARY_BOX_TITLE: &str = "Primary dependencies";

/// Words Mermaid's flowchart grammar reserves; node ids must avoid them
const RESERVED_IDS: &[&str] = &[
    "call",
    "class",
    "classdef",
    "click",
    "default",
    "direction",
    "end",
    "flowchart",
    "graph",
    "href",
    "interpolate",
    "linkstyle",
    "style",
    "subgraph",
];

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DepGraphError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DepGraphError::from)
    };
}

/// Turn a package name into a Mermaid node id
///
/// Lower-cases the name and replaces each run of characters outside
/// `[a-z0-9]` with a single underscore. Ids that clash with a reserved word
/// get a `_0` suffix.
pub fn normalize_package_name(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
            in_separator = false;
        } else if !in_separator {
            id.push('_');
            in_separator = true;
        }
    }
    if RESERVED_IDS.contains(&id.as_str()) {
        id.push_str("_0");
    }
    id
}

/// Id of the subgraph box holding a bucket
///
/// Node ids never contain `__`, so box ids cannot clash with them.
fn bucket_box_id(bucket: &Bucket) -> String {
    format!("{}__{}", bucket.kind, normalize_package_name(&bucket.name))
}

fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
}

fn node_label(package: &Package, specifier: Option<&str>) -> String {
    let mut label = escape_label(&package.name);
    if !package.version.is_empty() {
        label.push_str("<br/>");
        label.push_str(&escape_label(&package.version));
    }
    if let Some(spec) = specifier {
        label.push_str("<br/>");
        label.push_str(&escape_label(spec));
    }
    label
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Subroutine,
    Hexagon,
    Rounded,
}

impl Shape {
    fn wrap(self, id: &str, label: &str) -> String {
        match self {
            Shape::Subroutine => format!("{id}[[\"{label}\"]]"),
            Shape::Hexagon => format!("{id}{{{{\"{label}\"}}}}"),
            Shape::Rounded => format!("{id}(\"{label}\")"),
        }
    }
}

/// Renders a [`DependencyGraph`] as a Mermaid flowchart
///
/// The same inputs always produce byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct MermaidRenderer {
    groups: Vec<Bucket>,
    extras: Vec<Bucket>,
    specifiers: LockSpecifiers,
}

/// Per-render lookups shared by the section writers
struct RenderContext<'a> {
    graph: &'a DependencyGraph,
    metrics: LayoutMetrics,
    edges: BTreeSet<(String, String)>,
    /// Package name → package, first BOM reference wins per node id
    packages: BTreeMap<&'a str, &'a Package>,
    owners: BTreeMap<&'a str, &'a Bucket>,
    direct: BTreeSet<&'a str>,
    primary: Vec<&'a str>,
    others: Vec<&'a str>,
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(mut self, groups: Vec<Bucket>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_extras(mut self, extras: Vec<Bucket>) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_specifiers(mut self, specifiers: LockSpecifiers) -> Self {
        self.specifiers = specifiers;
        self
    }

    fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.groups.iter().chain(self.extras.iter())
    }

    pub fn render_to_string(&self, graph: &DependencyGraph) -> Result<String> {
        let mut output = Vec::new();
        self.render_mermaid(graph, &mut output)?;
        String::from_utf8(output).map_err(|e| {
            miette::Report::from(DepGraphError::GraphError {
                message: format!("Rendered diagram is not valid UTF-8: {e}"),
            })
        })
    }

    pub fn render_mermaid(&self, graph: &DependencyGraph, output: &mut dyn Write) -> Result<()> {
        let ctx = self.context(graph);

        writeln_out!(output, "flowchart LR")?;
        let root_package = ctx
            .packages
            .get(graph.root.as_str())
            .map(|p| (*p).clone())
            .unwrap_or_else(|| Package::new(graph.root.clone(), ""));
        writeln_out!(
            output,
            "    {}",
            Shape::Subroutine.wrap(
                &normalize_package_name(&graph.root),
                &node_label(&root_package, None)
            )
        )?;

        let mut declared: Vec<&str> = vec![graph.root.as_str()];

        if !ctx.primary.is_empty() {
            writeln_out!(output)?;
            writeln_out!(
                output,
                "    subgraph {}[\"{}\"]",
                PRIMARY_BOX_ID,
                PRIMARY_BOX_TITLE
            )?;
            for &name in &ctx.primary {
                let id = normalize_package_name(name);
                let label = node_label(ctx.packages[name], None);
                writeln_out!(output, "        {}", Shape::Hexagon.wrap(&id, &label))?;
                declared.push(name);
            }
            writeln_out!(output, "    end")?;
        }

        if !ctx.others.is_empty() {
            writeln_out!(output)?;
            for &name in &ctx.others {
                let id = normalize_package_name(name);
                let label = node_label(ctx.packages[name], None);
                writeln_out!(output, "    {}", Shape::Rounded.wrap(&id, &label))?;
                declared.push(name);
            }
        }

        let mut rendered_boxes: Vec<&Bucket> = Vec::new();
        for bucket in self.buckets() {
            let mut members: Vec<&str> = bucket
                .packages
                .iter()
                .map(String::as_str)
                .filter(|name| {
                    ctx.owners
                        .get(name)
                        .is_some_and(|b| b.kind == bucket.kind && b.name == bucket.name)
                })
                .collect();
            if members.is_empty() {
                continue;
            }
            members.sort_by(|a, b| ctx.metrics.node_key(a).cmp(&ctx.metrics.node_key(b)));

            writeln_out!(output)?;
            writeln_out!(
                output,
                "    subgraph {}[\"{} {}\"]",
                bucket_box_id(bucket),
                bucket.kind.flag(),
                escape_label(&bucket.name)
            )?;
            for name in members {
                let id = normalize_package_name(name);
                let specifier =
                    self.specifiers
                        .bucket(&graph.root, bucket.kind, &bucket.name, name);
                let label = node_label(ctx.packages[name], specifier);
                let shape = if ctx.direct.contains(name) {
                    Shape::Hexagon
                } else {
                    Shape::Rounded
                };
                writeln_out!(output, "        {}", shape.wrap(&id, &label))?;
                declared.push(name);
            }
            writeln_out!(output, "    end")?;
            rendered_boxes.push(bucket);
        }

        self.write_edges(&ctx, &rendered_boxes, output)?;

        writeln_out!(output)?;
        for name in &declared {
            writeln_out!(
                output,
                "    click {} \"{}/{}/\" _blank",
                normalize_package_name(name),
                PYPI_PROJECT_URL,
                name
            )?;
        }

        writeln_out!(output)?;
        writeln_out!(
            output,
            "    style {} {}",
            normalize_package_name(&graph.root),
            styles::THICK_BORDER
        )?;
        for name in &ctx.primary {
            writeln_out!(
                output,
                "    style {} {}",
                normalize_package_name(name),
                styles::THICK_BORDER
            )?;
        }
        if !ctx.primary.is_empty() {
            writeln_out!(output, "    style {} {}", PRIMARY_BOX_ID, styles::PRIMARY_BOX)?;
        }
        for bucket in &rendered_boxes {
            let style = match bucket.kind {
                BucketKind::Group => styles::GROUP_BOX,
                BucketKind::Extra => styles::EXTRA_BOX,
            };
            writeln_out!(output, "    style {} {}", bucket_box_id(bucket), style)?;
        }

        Ok(())
    }

    fn context<'a>(&'a self, graph: &'a DependencyGraph) -> RenderContext<'a> {
        let edges = graph.unique_edges();
        let metrics = LayoutMetrics::compute(&graph.root, &edges);

        let mut packages: BTreeMap<&str, &Package> = BTreeMap::new();
        let mut ids: BTreeSet<String> = BTreeSet::new();
        for package in graph.nodes.values() {
            if packages.contains_key(package.name.as_str()) {
                continue;
            }
            if ids.insert(normalize_package_name(&package.name)) {
                packages.insert(package.name.as_str(), package);
            }
        }

        let mut owners: BTreeMap<&str, &Bucket> = BTreeMap::new();
        for bucket in self.buckets() {
            for name in &bucket.packages {
                if name != &graph.root && packages.contains_key(name.as_str()) {
                    owners.entry(name.as_str()).or_insert(bucket);
                }
            }
        }

        let direct: BTreeSet<&str> = graph
            .edges
            .iter()
            .filter(|e| e.from == graph.root && e.to != graph.root)
            .map(|e| e.to.as_str())
            .filter(|name| packages.contains_key(name))
            .collect();

        let mut primary: Vec<&str> = direct
            .iter()
            .copied()
            .filter(|name| !owners.contains_key(name))
            .collect();
        primary.sort_by(|a, b| metrics.primary_key(a).cmp(&metrics.primary_key(b)));

        let mut others: Vec<&str> = packages
            .keys()
            .copied()
            .filter(|name| *name != graph.root)
            .filter(|name| !direct.contains(name) && !owners.contains_key(name))
            .collect();
        others.sort_by(|a, b| metrics.node_key(a).cmp(&metrics.node_key(b)));

        RenderContext {
            graph,
            metrics,
            edges,
            packages,
            owners,
            direct,
            primary,
            others,
        }
    }

    fn write_edges(
        &self,
        ctx: &RenderContext<'_>,
        rendered_boxes: &[&Bucket],
        output: &mut dyn Write,
    ) -> Result<()> {
        let root = ctx.graph.root.as_str();
        let known_ids: BTreeSet<String> = ctx
            .packages
            .keys()
            .map(|name| normalize_package_name(name))
            .chain(std::iter::once(normalize_package_name(root)))
            .collect();
        let primary: BTreeSet<&str> = ctx.primary.iter().copied().collect();

        let mut ordered: Vec<(&str, &str)> = ctx
            .edges
            .iter()
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        ordered.sort_by(|a, b| {
            ctx.metrics
                .edge_key(a.0, a.1)
                .cmp(&ctx.metrics.edge_key(b.0, b.1))
        });

        let mut lines = Vec::new();
        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
        let mut reached: BTreeSet<String> = BTreeSet::new();

        for (from, to) in ordered {
            let from_id = normalize_package_name(from);
            let to_id = normalize_package_name(to);
            if !known_ids.contains(&from_id) || !known_ids.contains(&to_id) {
                continue;
            }

            if from == root {
                if let Some(bucket) = ctx.owners.get(to) {
                    reached.insert(bucket_box_id(bucket));
                    continue;
                }
            }

            if !seen.insert((from_id.clone(), to_id.clone())) {
                continue;
            }

            let arrow = if from == root || primary.contains(to) {
                "==>"
            } else {
                "-->"
            };
            let line = match self.specifiers.edge(from, to) {
                Some(spec) => format!("{from_id} {arrow}|\"{}\"| {to_id}", escape_label(spec)),
                None => format!("{from_id} {arrow} {to_id}"),
            };
            lines.push(line);
        }

        let root_id = normalize_package_name(root);
        for bucket in rendered_boxes {
            let box_id = bucket_box_id(bucket);
            if reached.contains(&box_id) {
                lines.push(format!("{root_id} -.-> {box_id}"));
            }
        }

        if lines.is_empty() {
            return Ok(());
        }

        writeln_out!(output)?;
        for line in lines {
            writeln_out!(output, "    {}", line)?;
        }
        Ok(())
    }
}

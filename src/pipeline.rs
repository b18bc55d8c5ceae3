//! End-to-end graph generation
//!
//! Fetches the SBOMs a request needs, classifies group and extra packages,
//! applies the requested filters and renders the result.

use miette::Result;
use tracing::debug;

use crate::error::DepGraphError;
use crate::graph::{
    BucketCandidate, BucketKind, Classification, DependencyGraph, MermaidRenderer,
    add_extra_edges, build_dependency_graph, classify_buckets, package_names,
};
use crate::lockfile::{LockSpecifiers, canonicalize_name};
use crate::manifest::ProjectManifest;
use crate::progress::ProgressReporter;
use crate::sbom::{CycloneDxBom, ExportRequest, SbomExporter, SbomFetcher};

/// What to draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRequest {
    /// Workspace package to scope the export to, and to root the graph at
    pub package: Option<String>,
    pub groups: Vec<String>,
    pub extras: Vec<String>,
    /// Add every group declared in the manifest
    pub all_groups: bool,
    /// Add every extra declared in the manifest
    pub all_extras: bool,
    /// Hide everything the base install already pulls in
    pub only_unique: bool,
    pub depth: Option<usize>,
    pub frozen: bool,
}

impl GraphRequest {
    /// Expand `all_groups`/`all_extras` against the manifest
    ///
    /// Explicitly requested names come first, in the order given; manifest
    /// names follow in sorted order. Duplicates are dropped.
    pub fn resolve(&self, manifest: &ProjectManifest) -> GraphRequest {
        fn merge(explicit: &[String], declared: &[String], all: bool) -> Vec<String> {
            let mut out: Vec<String> = Vec::new();
            let extra: &[String] = if all { declared } else { &[] };
            for name in explicit.iter().chain(extra) {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            out
        }

        GraphRequest {
            groups: merge(&self.groups, &manifest.groups, self.all_groups),
            extras: merge(&self.extras, &manifest.extras, self.all_extras),
            all_groups: false,
            all_extras: false,
            ..self.clone()
        }
    }

    fn has_buckets(&self) -> bool {
        !self.groups.is_empty() || !self.extras.is_empty()
    }

    fn export(&self) -> ExportRequest {
        ExportRequest::new(self.package.clone(), self.frozen)
    }
}

/// A filtered graph plus the bucket attribution used to draw it
#[derive(Debug, Clone, Default)]
pub struct PreparedGraph {
    pub graph: DependencyGraph,
    pub classification: Classification,
}

pub struct GraphPipeline<E> {
    fetcher: SbomFetcher<E>,
    specifiers: LockSpecifiers,
    manifest: ProjectManifest,
}

impl<E: SbomExporter> GraphPipeline<E> {
    pub fn new(exporter: E) -> Self {
        Self {
            fetcher: SbomFetcher::new(exporter),
            specifiers: LockSpecifiers::default(),
            manifest: ProjectManifest::default(),
        }
    }

    pub fn with_specifiers(mut self, specifiers: LockSpecifiers) -> Self {
        self.specifiers = specifiers;
        self
    }

    pub fn with_manifest(mut self, manifest: ProjectManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn fetcher(&self) -> &SbomFetcher<E> {
        &self.fetcher
    }

    fn fetch(
        &mut self,
        request: &ExportRequest,
        label: &str,
        progress: Option<&mut ProgressReporter>,
    ) -> Result<CycloneDxBom, DepGraphError> {
        match progress {
            Some(p) if !self.fetcher.cache().contains(request) => {
                p.start_export(label);
                let result = self.fetcher.fetch(request);
                p.finish_export(result.is_ok());
                result
            }
            _ => self.fetcher.fetch(request),
        }
    }

    /// Fetch, classify and filter, without rendering
    pub fn prepare(
        &mut self,
        request: &GraphRequest,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<PreparedGraph, DepGraphError> {
        let request = &request.resolve(&self.manifest);
        if request.only_unique && !request.has_buckets() {
            return Err(DepGraphError::ConfigurationError {
                message: "--only-unique needs at least one --group or --extra".to_string(),
            });
        }

        let main_request = request
            .export()
            .with_groups(request.groups.clone())
            .with_extras(request.extras.clone());
        let main = self.fetch(&main_request, "dependency graph", progress.as_deref_mut())?;

        let sbom_root = main.root_component().and_then(|c| c.display_name());
        let package = request
            .package
            .as_deref()
            .map(|p| spelled_as_in(&main, p));
        let is_subtree = match (package.as_deref(), sbom_root) {
            (Some(package), Some(root)) => canonicalize_name(package) != canonicalize_name(root),
            (Some(_), None) => true,
            (None, _) => false,
        };
        let mut graph = build_dependency_graph(&main, package.as_deref());
        debug!(
            root = %graph.root,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "built dependency graph"
        );

        let mut classification = Classification::default();
        if request.has_buckets() {
            let base = self.fetch(&request.export(), "base dependencies", progress.as_deref_mut())?;
            let base_names = package_names(&base);

            let mut candidates = Vec::new();
            for group in &request.groups {
                let sbom = self.fetch(
                    &request.export().with_groups(vec![group.clone()]),
                    &format!("group {group}"),
                    progress.as_deref_mut(),
                )?;
                candidates.push(BucketCandidate::new(
                    BucketKind::Group,
                    group.clone(),
                    package_names(&sbom),
                ));
            }
            for extra in &request.extras {
                let sbom = self.fetch(
                    &request.export().with_extras(vec![extra.clone()]),
                    &format!("extra {extra}"),
                    progress.as_deref_mut(),
                )?;
                candidates.push(BucketCandidate::new(
                    BucketKind::Extra,
                    extra.clone(),
                    package_names(&sbom),
                ));
            }

            classification = classify_buckets(&graph.root, &base_names, &candidates);
            graph = add_extra_edges(&graph, &classification);
        }

        if request.only_unique {
            graph = graph.retain_names(&classification.allowed_names(&graph.root));
        }

        if let Some(package) = package.as_deref()
            && is_subtree
        {
            graph = graph.filter_to_package(package);
        }

        if let Some(depth) = request.depth {
            graph = graph.trim_to_depth(depth);
        }

        Ok(PreparedGraph {
            graph,
            classification,
        })
    }

    /// Produce the Mermaid diagram for a request
    pub fn render(
        &mut self,
        request: &GraphRequest,
        progress: Option<&mut ProgressReporter>,
    ) -> Result<String> {
        let prepared = self.prepare(request, progress)?;
        self.render_prepared(&prepared)
    }

    pub fn render_prepared(&self, prepared: &PreparedGraph) -> Result<String> {
        MermaidRenderer::new()
            .with_groups(prepared.classification.groups())
            .with_extras(prepared.classification.extras())
            .with_specifiers(self.specifiers.clone())
            .render_to_string(&prepared.graph)
    }
}

/// The document's own spelling of `name`, compared PEP 503 style
fn spelled_as_in(sbom: &CycloneDxBom, name: &str) -> String {
    let wanted = canonicalize_name(name);
    sbom.root_component()
        .into_iter()
        .chain(sbom.components.iter())
        .filter_map(|c| c.display_name())
        .find(|candidate| canonicalize_name(candidate) == wanted)
        .unwrap_or(name)
        .to_string()
}

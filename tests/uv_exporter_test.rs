//! End-to-end tests for `UvExporter` against a stand-in `uv` script
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;
use uv_dep_graph::error::DepGraphError;
use uv_dep_graph::pipeline::{GraphPipeline, GraphRequest};
use uv_dep_graph::sbom::{ExportRequest, SbomExporter, SbomFetcher, UvExporter};

const SBOM: &str = r#"{"bomFormat":"CycloneDX","specVersion":"1.5","metadata":{"component":{"name":"svc","version":"0.3.0","bom-ref":"svc-1@0.3.0"}},"components":[{"name":"anyio","version":"4.4.0","bom-ref":"anyio-2@4.4.0"},{"name":"sniffio","version":"1.3.1","bom-ref":"sniffio-3@1.3.1"}],"dependencies":[{"ref":"svc-1@0.3.0","dependsOn":["anyio-2@4.4.0"]},{"ref":"anyio-2@4.4.0","dependsOn":["sniffio-3@1.3.1"]}]}"#;

/// Write an executable script that logs its arguments and working directory
fn fake_uv(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-uv");
    let script = format!(
        "#!/bin/sh\necho \"$(pwd -P) $*\" >> \"{log}\"\n{body}\n",
        log = dir.join("calls.log").display()
    );
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_exporter_runs_uv_export_in_project_dir() {
    let tools = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let program = fake_uv(tools.path(), &format!("cat <<'EOF'\n{SBOM}\nEOF"));

    let exporter = UvExporter::new(program.display().to_string())
        .with_project_dir(Some(project.path().to_path_buf()));
    let request = ExportRequest::new(Some("svc".to_string()), true)
        .with_groups(vec!["test".to_string()])
        .with_extras(vec!["aws".to_string()]);
    let raw = exporter.export(&request).unwrap();
    assert!(predicate::str::contains("\"bom-ref\":\"anyio-2@4.4.0\"").eval(&raw));

    let logged = calls(tools.path());
    assert_eq!(logged.len(), 1);
    let line = logged[0].as_str();
    let project_dir = fs::canonicalize(project.path()).unwrap();
    assert!(predicate::str::starts_with(project_dir.display().to_string()).eval(line));
    assert!(
        predicate::str::contains(
            "export --format cyclonedx1.5 --no-default-groups --frozen --package svc --group test --extra aws"
        )
        .eval(line)
    );
}

#[test]
fn test_non_zero_exit_reports_stderr() {
    let tools = TempDir::new().unwrap();
    let program = fake_uv(
        tools.path(),
        "echo 'error: Group `docs` is not defined in the project' >&2\nexit 2",
    );

    let exporter = UvExporter::new(program.display().to_string());
    let err = exporter
        .export(&ExportRequest::default().with_groups(vec!["docs".to_string()]))
        .unwrap_err();

    match err {
        DepGraphError::ExporterFailed { stderr, status, .. } => {
            assert!(predicate::str::contains("is not defined").eval(&stderr));
            assert!(predicate::str::contains("2").eval(&status));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_garbage_output_is_a_parse_error() {
    let tools = TempDir::new().unwrap();
    let program = fake_uv(tools.path(), "echo 'Resolved 3 packages in 1ms'");

    let mut fetcher = SbomFetcher::new(UvExporter::new(program.display().to_string()));
    let err = fetcher.fetch(&ExportRequest::default()).unwrap_err();
    assert!(matches!(err, DepGraphError::SbomParse(_)));
}

#[test]
fn test_pipeline_renders_through_real_process() {
    let tools = TempDir::new().unwrap();
    let program = fake_uv(tools.path(), &format!("cat <<'EOF'\n{SBOM}\nEOF"));

    let mut pipeline = GraphPipeline::new(UvExporter::new(program.display().to_string()));
    let mermaid = pipeline.render(&GraphRequest::default(), None).unwrap();

    assert!(predicate::str::starts_with("flowchart LR\n").eval(&mermaid));
    assert!(predicate::str::contains("    svc ==> anyio\n").eval(&mermaid));
    assert!(predicate::str::contains("    anyio --> sniffio\n").eval(&mermaid));
    assert_eq!(calls(tools.path()).len(), 1);
}

//! Render command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use miette::{IntoDiagnostic, Result, WrapErr};

use crate::common::{lockfile_path, manifest_path};
use crate::config::RenderConfig;
use crate::executors::CommandExecutor;
use crate::lockfile::LockSpecifiers;
use crate::manifest::ProjectManifest;
use crate::pipeline::GraphPipeline;
use crate::progress::ProgressReporter;
use crate::sbom::UvExporter;

pub struct RenderExecutor;

impl CommandExecutor for RenderExecutor {
    type Config = RenderConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let manifest = ProjectManifest::from_path(&manifest_path(&config.project_dir))
            .wrap_err("Failed to read project manifest")?;
        let specifiers = LockSpecifiers::from_path(&lockfile_path(&config.project_dir))
            .wrap_err("Failed to read lockfile")?;

        let exporter = UvExporter::new(config.program.clone())
            .with_project_dir(Some(config.project_dir.clone()));
        let mut pipeline = GraphPipeline::new(exporter)
            .with_manifest(manifest)
            .with_specifiers(specifiers);

        let mut progress = ProgressReporter::new();
        progress.start_render(&config.project_dir);

        let prepared = pipeline
            .prepare(&config.request, Some(&mut progress))
            .wrap_err_with(|| {
                format!(
                    "Failed to build dependency graph with '{}'",
                    pipeline.fetcher().exporter().program()
                )
            })?;
        let mermaid = pipeline
            .render_prepared(&prepared)
            .wrap_err("Failed to render Mermaid graph")?;

        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };
        output_writer
            .write_all(mermaid.as_bytes())
            .into_diagnostic()
            .wrap_err("Failed to write Mermaid graph")?;
        output_writer.flush().into_diagnostic()?;

        progress.finish_render(prepared.graph.names().len(), config.output.as_deref());

        Ok(())
    }
}

//! Buckets command executor

use std::fmt::Write as _;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::common::manifest_path;
use crate::config::BucketsConfig;
use crate::error::DepGraphError;
use crate::executors::CommandExecutor;
use crate::graph::BucketKind;
use crate::manifest::ProjectManifest;
use crate::utils::string::pluralize;

pub struct BucketsExecutor;

impl CommandExecutor for BucketsExecutor {
    type Config = BucketsConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let path = manifest_path(&config.project_dir);
        let manifest =
            ProjectManifest::from_path(&path).wrap_err("Failed to read project manifest")?;

        let report = match config.format {
            OutputFormat::Human => human_report(&manifest)?,
            OutputFormat::Json => serde_json::to_string_pretty(&manifest)
                .into_diagnostic()
                .wrap_err("Failed to serialize bucket listing")?,
        };
        println!("{report}");

        if manifest.is_empty() {
            eprintln!(
                "{} No dependency groups or extras declared in {}",
                style("ℹ").blue(),
                style(path.display()).dim()
            );
        }

        Ok(())
    }
}

/// One line per bucket, written as the flag that selects it
fn human_report(manifest: &ProjectManifest) -> Result<String, DepGraphError> {
    let mut out = String::new();
    let sections = [
        (BucketKind::Group, &manifest.groups),
        (BucketKind::Extra, &manifest.extras),
    ];

    for (kind, names) in sections {
        writeln!(
            out,
            "{} {}:",
            names.len(),
            pluralize(&kind.to_string(), names.len())
        )?;
        for name in names {
            writeln!(out, "  {} {name}", kind.flag())?;
        }
    }

    Ok(out.trim_end().to_string())
}

//! Generation orchestrator.
//!
//! Runs one batch: check the backend root, extract, build descriptors,
//! render every artifact in memory, and only then write. A run that finds
//! neither classes nor endpoints aborts before rendering, so previously
//! generated artifacts survive a parser regression untouched.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_codegen::{GenerationPipeline, RunOptions};
//! use apigen_core::GeneratorConfig;
//!
//! # fn example() -> apigen_core::Result<()> {
//! let pipeline = GenerationPipeline::new(GeneratorConfig::default())
//!     .with_options(RunOptions { force: true, dry_run: false });
//! let report = pipeline.run()?;
//! println!("{} endpoints, status {}", report.endpoint_count, report.status);
//! # Ok(())
//! # }
//! ```

use crate::generator::{ApiGenerator, GenerationInput};
use crate::output::write_atomic;
use apigen_core::{
    AbortReason, ArtifactReport, Diagnostic, GenerationReport, GeneratorConfig, Result, RunStatus,
};
use apigen_extractor::{DescriptorBuilder, SourceScanner, TypeNames};
use std::collections::BTreeSet;

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the notice about overwriting existing artifacts
    pub force: bool,
    /// Render and report, but write nothing
    pub dry_run: bool,
}

/// Sequences extraction, descriptor building, rendering, and writing.
#[derive(Debug, Clone)]
pub struct GenerationPipeline {
    config: GeneratorConfig,
    options: RunOptions,
}

impl GenerationPipeline {
    /// Creates a pipeline with default options.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            options: RunOptions::default(),
        }
    }

    /// Replaces the run options.
    #[must_use]
    pub const fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs one generation.
    ///
    /// Missing inputs, unparsable files, guessed path parameters, and
    /// skipped actions are reported in the returned
    /// [`GenerationReport`]. Both abort conditions also return `Ok`, with
    /// [`RunStatus::Aborted`] and nothing written.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render or an artifact cannot
    /// be written.
    pub fn run(&self) -> Result<GenerationReport> {
        let config = &self.config;

        if !config.backend_root.is_dir() {
            tracing::error!("Backend directory not found: {}", config.backend_root.display());
            return Ok(self.abort(
                AbortReason::BackendRootMissing,
                vec![Diagnostic::backend_root_missing(&config.backend_root)],
            ));
        }

        tracing::info!("Scanning {}", config.backend_root.display());
        let extraction = SourceScanner::new(config).scan();
        let mut diagnostics = extraction.diagnostics;

        let names = TypeNames::from_classes(&extraction.classes);
        let built = DescriptorBuilder::new(&names).build(&extraction.controllers);
        tracing::info!(
            "Extracted {} classes, {} actions ({} resolved, {} skipped)",
            extraction.classes.len(),
            extraction.controllers.iter().map(|c| c.endpoints.len()).sum::<usize>(),
            built.descriptors.len(),
            built.skipped.len()
        );

        for skipped in &built.skipped {
            diagnostics.push(Diagnostic::unresolved_response_type(
                &skipped.source,
                &skipped.operation_name,
            ));
        }

        if extraction.classes.is_empty() && built.descriptors.is_empty() {
            tracing::error!("No classes or endpoints found, leaving existing artifacts untouched");
            diagnostics.push(Diagnostic::nothing_extracted(&config.backend_root));
            let mut report = self.abort(AbortReason::NothingExtracted, diagnostics);
            report.skipped = built.skipped;
            return Ok(report);
        }

        let input = GenerationInput {
            classes: &extraction.classes,
            descriptors: &built.descriptors,
            registry: &extraction.registry,
        };
        let generation = ApiGenerator::new(config)?.generate(&input)?;
        diagnostics.extend(generation.diagnostics);

        let mut artifacts = Vec::with_capacity(generation.code.file_count());
        for file in generation.code.files() {
            let path = config.artifact_path(file.kind);
            let replaced_existing = path.exists();
            if replaced_existing && !self.options.force {
                tracing::info!("Overwriting existing {}", path.display());
            }
            if !self.options.dry_run {
                write_atomic(&path, &file.content)?;
            }
            artifacts.push(ArtifactReport {
                kind: file.kind,
                path,
                bytes: file.len(),
                replaced_existing,
                written: !self.options.dry_run,
            });
        }

        let controllers: BTreeSet<_> = built
            .descriptors
            .iter()
            .map(|d| d.controller_name.clone())
            .collect();

        let mut report = GenerationReport {
            status: RunStatus::Success,
            abort_reason: None,
            class_count: extraction.classes.len(),
            request_type_count: names.request_count(),
            response_type_count: names.response_count(),
            value_object_count: extraction.registry.len(),
            endpoint_count: built.descriptors.len(),
            controllers: controllers.into_iter().collect(),
            skipped: built.skipped,
            diagnostics,
            artifacts,
            dry_run: self.options.dry_run,
        };
        report.settle();

        tracing::info!(
            "Generated {} types, {} endpoints, {} skipped",
            report.class_count,
            report.endpoint_count,
            report.skipped.len()
        );
        Ok(report)
    }

    fn abort(&self, reason: AbortReason, diagnostics: Vec<Diagnostic>) -> GenerationReport {
        let mut report = GenerationReport::aborted(reason, diagnostics);
        report.dry_run = self.options.dry_run;
        report
    }
}

//! Generation orchestrator
//!
//! The only component that touches the filesystem. Every step is awaited
//! to completion before the next begins, and every file is opened, written
//! and closed within its own step.

use crate::config::GeneratorConfig;
use crate::document::SpecDocument;
use crate::error::{GenerationError, GenerationResult};
use crate::report::{AggregatorOutcome, GenerationReport, MethodAction};
use fsmgen_artifact::{Identifier, SourceArtifact, StateMachineSpec};
use fsmgen_merge::{MergeEngine, MethodPlacement};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Result of handling one entity file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityWrite {
    Written,
    Skipped,
}

/// Drives validation, entity files and the aggregator merge
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
    engine: MergeEngine,
}

impl Generator {
    /// Create generator
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let engine = MergeEngine::new(config.dialect.clone());
        Self { config, engine }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate `document` and generate.
    ///
    /// This is the entry point for collaborators. Failures are logged and
    /// returned; nothing here terminates the process.
    ///
    /// # Errors
    /// See [`generate_spec`](Self::generate_spec); additionally
    /// [`GenerationError::Invalid`] before any filesystem access.
    pub async fn generate(&self, document: &SpecDocument) -> GenerationResult<GenerationReport> {
        let result = match document.validate() {
            Ok(spec) => self.generate_spec(&spec).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = &result {
            tracing::error!("Generation failed: {}", e);
        }
        result
    }

    /// Generate from an already validated spec
    ///
    /// # Workflow
    /// 1. Ensure the output directory exists
    /// 2. Write each missing entity file, skip existing ones
    /// 3. Render the aggregator fresh, or merge into the existing file
    ///
    /// # Errors
    /// - [`GenerationError::Io`] if a directory or file operation fails
    /// - [`GenerationError::Merge`] if the existing aggregator cannot be
    ///   updated; entity files written before remain, the aggregator is
    ///   left unmodified
    pub async fn generate_spec(
        &self,
        spec: &StateMachineSpec,
    ) -> GenerationResult<GenerationReport> {
        let directory = spec.path().to_path_buf();
        tracing::info!("Generating {} at path: {}", spec.name(), directory.display());

        let directory_created = ensure_directory(&directory).await?;

        let mut entities_written = Vec::new();
        let mut entities_skipped = Vec::new();
        for state in spec.states() {
            let path = self.file_path(&directory, state);
            match self.write_entity(&path, state, spec.name()).await? {
                EntityWrite::Written => entities_written.push(path),
                EntityWrite::Skipped => entities_skipped.push(path),
            }
        }

        let aggregator_path = self.file_path(&directory, spec.name());
        let aggregator = self.update_aggregator(&aggregator_path, spec).await?;

        Ok(GenerationReport {
            directory,
            directory_created,
            entities_written,
            entities_skipped,
            aggregator_path,
            aggregator,
        })
    }

    fn file_path(&self, directory: &Path, name: &Identifier) -> PathBuf {
        directory.join(self.config.dialect.file_name(name))
    }

    /// Create the entity file unless it exists; never overwrites
    async fn write_entity(
        &self,
        path: &Path,
        state: &Identifier,
        aggregator: &Identifier,
    ) -> GenerationResult<EntityWrite> {
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;
        let file = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(
                    "File {} already exists. Skipping to preserve existing content.",
                    path.display()
                );
                return Ok(EntityWrite::Skipped);
            }
            Err(e) => return Err(GenerationError::io_error(path, e)),
        };

        let content = self.engine.renderer().render_entity(state, aggregator);
        fill_new_file(path, file, content.as_bytes()).await?;
        tracing::info!("Generated state class at: {}", path.display());
        Ok(EntityWrite::Written)
    }

    async fn update_aggregator(
        &self,
        path: &Path,
        spec: &StateMachineSpec,
    ) -> GenerationResult<AggregatorOutcome> {
        let existing = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let content = self.engine.renderer().render_aggregator(spec);
                tokio::fs::write(path, content)
                    .await
                    .map_err(|e| GenerationError::io_error(path, e))?;
                tracing::info!("Generated state machine class at: {}", path.display());
                return Ok(AggregatorOutcome::Created);
            }
            Err(e) => return Err(GenerationError::io_error(path, e)),
        };

        let artifact = SourceArtifact::parse(&existing);
        let outcome = self
            .engine
            .merge(&artifact, spec)
            .map_err(|e| GenerationError::merge_error(path, e))?;

        tokio::fs::write(path, outcome.artifact.render())
            .await
            .map_err(|e| GenerationError::io_error(path, e))?;

        let method = match outcome.plan.placement() {
            MethodPlacement::ReplaceBody { .. } => MethodAction::Rebuilt,
            MethodPlacement::Insert { .. } => MethodAction::Inserted,
        };
        let declarations_added = outcome.plan.declarations_to_insert().to_vec();
        tracing::info!(
            added = declarations_added.len(),
            ?method,
            "Updated state machine class at: {}",
            path.display()
        );
        Ok(AggregatorOutcome::Merged {
            declarations_added,
            method,
        })
    }
}

/// Write `content` into a file this call just created.
///
/// On failure the file is removed again, so a retry does not mistake a
/// partial file for an existing one.
async fn fill_new_file<W>(path: &Path, mut file: W, content: &[u8]) -> GenerationResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(content).await?;
        file.flush().await
    }
    .await;
    let Err(e) = written else {
        return Ok(());
    };

    drop(file);
    if let Err(cleanup) = tokio::fs::remove_file(path).await {
        tracing::warn!("Could not remove partial file {}: {}", path.display(), cleanup);
    }
    Err(GenerationError::io_error(path, e))
}

/// Create `directory` if missing; returns whether it was created
async fn ensure_directory(directory: &Path) -> GenerationResult<bool> {
    let exists = tokio::fs::try_exists(directory)
        .await
        .map_err(|e| GenerationError::io_error(directory, e))?;
    if exists {
        return Ok(false);
    }
    tracing::info!("Directory does not exist, creating new directory.");
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| GenerationError::io_error(directory, e))?;
    Ok(true)
}

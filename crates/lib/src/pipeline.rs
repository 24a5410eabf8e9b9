//! The solution-to-recipe pipeline facade.
//!
//! [`Pipeline`] is the whole surface the portal's web layer calls. It wires
//! the catalogue client, provider registry, recipe renderer and the snapshot
//! and job stores together. Store calls are short and never span a catalogue
//! request.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::filter::useful_solutions;
use crate::job::{FileJobStore, Job, JobError, JobStore};
use crate::provider::ProviderRegistry;
use crate::recipe::{RecipeError, RecipeRenderer, merge};
use crate::scm::{CatalogueClient, CatalogueError, Problem, Solution, Toolbox};
use crate::snapshot::{FileSnapshotStore, SnapshotError, SnapshotStore};

/// Image ids available for a job, grouped by provider id.
pub type JobImages = BTreeMap<String, BTreeSet<String>>;

/// Errors surfaced by pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Catalogue(#[from] CatalogueError),

  #[error(transparent)]
  Snapshot(#[from] SnapshotError),

  #[error(transparent)]
  Recipe(#[from] RecipeError),

  #[error("job {0} not found")]
  JobNotFound(i64),

  #[error("failed to load job {job_id}: {source}")]
  JobLoad {
    job_id: i64,
    #[source]
    source: JobError,
  },

  #[error("failed to persist job {job_id}: {source}")]
  JobPersistFailed {
    job_id: i64,
    #[source]
    source: JobError,
  },
}

/// Orchestrates catalogue lookups, filtering, merging and rendering.
pub struct Pipeline {
  catalogue: CatalogueClient,
  registry: ProviderRegistry,
  renderer: RecipeRenderer,
  snapshots: Arc<dyn SnapshotStore>,
  jobs: Arc<dyn JobStore>,
}

impl Pipeline {
  pub fn new(
    catalogue: CatalogueClient,
    registry: ProviderRegistry,
    renderer: RecipeRenderer,
    snapshots: Arc<dyn SnapshotStore>,
    jobs: Arc<dyn JobStore>,
  ) -> Self {
    Self {
      catalogue,
      registry,
      renderer,
      snapshots,
      jobs,
    }
  }

  /// Build a pipeline backed by the file stores and template named in `config`.
  pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
    let catalogue = CatalogueClient::new(config.scm_url.as_str(), config.timeouts())?;
    let renderer = match &config.template {
      Some(path) => RecipeRenderer::from_file(path)?,
      None => RecipeRenderer::new()?,
    };

    debug!(scm_url = %config.scm_url, providers = ?config.providers, "pipeline configured");
    Ok(Self::new(
      catalogue,
      config.registry(),
      renderer,
      Arc::new(FileSnapshotStore::new(config.snapshots_file())),
      Arc::new(FileJobStore::new(config.jobs_file())),
    ))
  }

  pub fn catalogue(&self) -> &CatalogueClient {
    &self.catalogue
  }

  pub fn registry(&self) -> &ProviderRegistry {
    &self.registry
  }

  /// The VM id of a pre-built image for `entry_id` at `provider_id`, if one exists.
  pub fn snapshot_vm_id(&self, entry_id: &str, provider_id: &str) -> Result<Option<String>, PipelineError> {
    Ok(self.snapshots.lookup(entry_id, provider_id)?)
  }

  /// Catalogue solutions (optionally for one problem) runnable at a configured provider.
  ///
  /// Solutions whose toolbox cannot be resolved are logged and left out; only
  /// a failure to list the catalogue is an error.
  pub async fn list_usable_solutions(&self, problem_id: Option<&str>) -> Result<Vec<Solution>, PipelineError> {
    let solutions = self.catalogue.list_solutions(problem_id).await?;
    let listed = solutions.len();

    let useful = useful_solutions(&self.catalogue, &self.registry, solutions).await;
    info!(listed, usable = useful.len(), problem = problem_id, "filtered catalogue solutions");
    Ok(useful)
  }

  /// All catalogue problems.
  pub async fn list_problems(&self) -> Result<Vec<Problem>, PipelineError> {
    Ok(self.catalogue.list_problems().await?)
  }

  /// The solution `job` runs, or `None` if it has not been given one.
  pub async fn solution_for_job(&self, job: &Job) -> Result<Option<Solution>, PipelineError> {
    match job.solution_id.as_deref() {
      Some(solution_id) => Ok(Some(self.catalogue.fetch_solution(solution_id).await?)),
      None => Ok(None),
    }
  }

  /// Image ids usable for a job, grouped by configured provider.
  ///
  /// `None` only when no job id is given. An unknown job, a job without a
  /// solution, or a toolbox with no images at configured providers all give
  /// an empty map.
  pub async fn images_for_job(&self, job_id: Option<i64>) -> Result<Option<JobImages>, PipelineError> {
    let Some(job_id) = job_id else {
      return Ok(None);
    };

    let Some(job) = self.load_job(job_id)? else {
      warn!(job_id, "no such job");
      return Ok(Some(JobImages::new()));
    };

    let Some(solution) = self.solution_for_job(&job).await? else {
      debug!(job_id, "job has no solution");
      return Ok(Some(JobImages::new()));
    };

    let toolbox = solution.toolbox(&self.catalogue, true).await?;
    Ok(Some(images_by_provider(&toolbox, &self.registry)))
  }

  /// Ids of the configured providers with images for a job; the key set of
  /// [`images_for_job`](Self::images_for_job).
  pub async fn providers_for_job(&self, job_id: Option<i64>) -> Result<Option<BTreeSet<String>>, PipelineError> {
    let images = self.images_for_job(job_id).await?;
    Ok(images.map(|images| images.into_keys().collect()))
  }

  /// Fetch the solution at `solution_url`, merge its dependencies with its
  /// toolbox's, and render the provisioning recipe.
  ///
  /// Any failure aborts the whole build; there is no partial recipe.
  pub async fn build_recipe(&self, solution_url: &str) -> Result<String, PipelineError> {
    let solution = self.catalogue.fetch_solution(solution_url).await?;
    let toolbox = solution.toolbox(&self.catalogue, true).await?;

    let manifest = merge(&toolbox, &solution);
    let recipe = self.renderer.render(&manifest).inspect_err(|e| {
      warn!(solution = solution_url, toolbox = %toolbox.name, error = %e, "failed to render recipe");
    })?;

    info!(solution = solution_url, sc_name = %manifest.sc_name, "built provisioning recipe");
    Ok(recipe)
  }

  /// Record `solution_id` as the solution job `job_id` runs.
  pub fn attach_solution_to_job(&self, job_id: i64, solution_id: &str) -> Result<(), PipelineError> {
    let mut job = self.load_job(job_id)?.ok_or(PipelineError::JobNotFound(job_id))?;

    job.solution_id = Some(solution_id.to_string());
    self
      .jobs
      .save(&job)
      .map_err(|source| PipelineError::JobPersistFailed { job_id, source })?;

    info!(job_id, solution = solution_id, "attached solution to job");
    Ok(())
  }

  fn load_job(&self, job_id: i64) -> Result<Option<Job>, PipelineError> {
    self
      .jobs
      .get(job_id)
      .map_err(|source| PipelineError::JobLoad { job_id, source })
  }
}

/// Group `toolbox` image ids by provider, keeping only providers in `registry`.
pub fn images_by_provider(toolbox: &Toolbox, registry: &ProviderRegistry) -> JobImages {
  let mut images = JobImages::new();
  for image in toolbox.images.iter().filter(|image| registry.contains(&image.provider)) {
    images
      .entry(image.provider.clone())
      .or_default()
      .insert(image.image_id.clone());
  }
  images
}

//! HTTP client for the catalogue.
//!
//! One [`CatalogueClient`] is shared by the whole process; the underlying
//! [`reqwest::Client`] pools connections and is cheap to clone.
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/solutions[?problem={id}]  -> { "solutions": [Solution, ...] }
//! GET {base}/problems                  -> { "problems": [Problem, ...] }
//! GET {solution_url}                   -> Solution
//! GET {toolbox_url}                    -> Toolbox
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};

use super::types::{Problem, ProblemEntries, Solution, SolutionEntries, Toolbox, ToolboxRef};

/// Errors that can occur talking to the catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
  /// Transport failure or timeout reaching the catalogue.
  #[error("catalogue unavailable at '{url}': {source}")]
  Unavailable {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The catalogue answered with a non-success status.
  #[error("catalogue returned {status} for '{url}'")]
  Status { url: String, status: StatusCode },

  /// The response body could not be decoded.
  #[error("malformed catalogue response from '{url}': {source}")]
  Malformed {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  /// A solution references a toolbox without saying where it lives.
  #[error("solution '{solution}' references a toolbox with no url")]
  MissingToolbox { solution: String },

  /// The HTTP client could not be constructed.
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),
}

impl CatalogueError {
  /// Whether the catalogue could not be reached or refused to answer.
  pub fn is_unavailable(&self) -> bool {
    matches!(self, CatalogueError::Unavailable { .. } | CatalogueError::Status { .. })
  }

  /// Whether the catalogue answered with something we could not use.
  pub fn is_malformed(&self) -> bool {
    matches!(
      self,
      CatalogueError::Malformed { .. } | CatalogueError::MissingToolbox { .. }
    )
  }
}

/// Per-request HTTP timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
  pub connect: Duration,
  pub read: Duration,
}

impl Default for Timeouts {
  fn default() -> Self {
    Self {
      connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
      read: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
    }
  }
}

/// Fetches and decodes catalogue entries.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
  http: Client,
  base_url: String,
}

impl CatalogueClient {
  /// Create a client for the catalogue at `base_url`.
  pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> Result<Self, CatalogueError> {
    let http = Client::builder()
      .connect_timeout(timeouts.connect)
      .read_timeout(timeouts.read)
      .build()
      .map_err(CatalogueError::Client)?;
    Ok(Self::with_http_client(http, base_url))
  }

  /// Create a client that shares an existing HTTP client.
  pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { http, base_url }
  }

  /// The catalogue base URL, without a trailing slash.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Fetch and decode the solution at `url`.
  ///
  /// A solution document without its own `url` takes the one it was fetched from.
  pub async fn fetch_solution(&self, url: &str) -> Result<Solution, CatalogueError> {
    let mut solution: Solution = self.get_json(url, &[]).await?;
    if solution.url.is_empty() {
      solution.url = url.to_string();
    }
    Ok(solution)
  }

  /// List catalogue solutions, optionally only those for one problem.
  pub async fn list_solutions(&self, problem: Option<&str>) -> Result<Vec<Solution>, CatalogueError> {
    let url = format!("{}/solutions", self.base_url);
    let query: Vec<(&str, &str)> = problem.into_iter().map(|id| ("problem", id)).collect();

    let entries: SolutionEntries = self.get_json(&url, &query).await?;
    let solutions = decode_entries(&url, entries.solutions);
    debug!(count = solutions.len(), problem, "listed solutions");
    Ok(solutions)
  }

  /// Fetch and decode the toolbox at `url`.
  pub async fn fetch_toolbox(&self, url: &str) -> Result<Toolbox, CatalogueError> {
    let mut toolbox: Toolbox = self.get_json(url, &[]).await?;
    if toolbox.url.is_empty() {
      toolbox.url = url.to_string();
    }
    Ok(toolbox)
  }

  /// List all catalogue problems.
  pub async fn list_problems(&self) -> Result<Vec<Problem>, CatalogueError> {
    let url = format!("{}/problems", self.base_url);
    let entries: ProblemEntries = self.get_json(&url, &[]).await?;
    Ok(decode_entries(&url, entries.problems))
  }

  /// Fetch and decode the problem at `url`.
  pub async fn fetch_problem(&self, url: &str) -> Result<Problem, CatalogueError> {
    self.get_json(url, &[]).await
  }

  async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, CatalogueError> {
    debug!(url, "GET catalogue entry");

    let unavailable = |source| CatalogueError::Unavailable {
      url: url.to_string(),
      source,
    };

    let response = self.http.get(url).query(query).send().await.map_err(unavailable)?;

    let status = response.status();
    if !status.is_success() {
      return Err(CatalogueError::Status {
        url: url.to_string(),
        status,
      });
    }

    let body = response.bytes().await.map_err(unavailable)?;
    serde_json::from_slice(&body).map_err(|source| CatalogueError::Malformed {
      url: url.to_string(),
      source,
    })
  }
}

/// Decode the entries of a listing, skipping (and logging) any that do not decode.
fn decode_entries<T: DeserializeOwned>(url: &str, entries: Vec<Value>) -> Vec<T> {
  entries
    .into_iter()
    .enumerate()
    .filter_map(|(index, entry)| match serde_json::from_value(entry) {
      Ok(decoded) => Some(decoded),
      Err(e) => {
        warn!(url, index, error = %e, "skipping malformed catalogue entry");
        None
      }
    })
    .collect()
}

impl Solution {
  /// The toolbox this solution runs in.
  ///
  /// With `expand`, a toolbox known only by URL is fetched from the catalogue
  /// so every attribute is present. Without it, the embedded value is
  /// returned as-is (a URL reference becomes a [`Toolbox::stub`]).
  pub async fn toolbox(&self, client: &CatalogueClient, expand: bool) -> Result<Toolbox, CatalogueError> {
    if !expand || !self.toolbox.is_stub() {
      return Ok(match &self.toolbox {
        ToolboxRef::Url(url) => Toolbox::stub(url.as_str()),
        ToolboxRef::Embedded(toolbox) => (**toolbox).clone(),
      });
    }

    let url = self.toolbox.url();
    if url.is_empty() {
      return Err(CatalogueError::MissingToolbox {
        solution: self.url.clone(),
      });
    }

    debug!(solution = %self.url, toolbox = url, "resolving toolbox");
    client.fetch_toolbox(url).await
  }
}

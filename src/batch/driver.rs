//! Batch driver: render each URL, run the pure core, isolate failures.
//!
//! One failed page never aborts the batch. Every input URL produces
//! exactly one output item, in input order, tagged Success or Failure;
//! the renderer is torn down exactly once after the whole batch.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extract::{self, decode::Table, image::ImageCandidate};
use crate::pool::sessions::SessionPool;
use crate::renderer::chrome::ChromeRenderer;
use crate::renderer::{self, RenderContext, Renderer};
use anyhow::Result;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one page's extraction attempt.
///
/// On success the image slot is populated exactly when resolution was
/// requested; the fallback chain guarantees a candidate in that case, so
/// `None` always means "not requested", never "not found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        table: Table,
        image: Option<ImageCandidate>,
    },
    Failure {
        error: ExtractError,
    },
}

/// One entry of the batch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub url: String,
    pub outcome: Outcome,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// The item's error, when it failed.
    pub fn error(&self) -> Option<&ExtractError> {
        match &self.outcome {
            Outcome::Failure { error } => Some(error),
            Outcome::Success { .. } => None,
        }
    }
}

/// Drives a renderer across a batch of URLs.
pub struct BatchExtractor {
    renderer: Arc<dyn Renderer>,
    pool: SessionPool,
    config: ExtractConfig,
}

impl BatchExtractor {
    pub fn new(renderer: Arc<dyn Renderer>, config: ExtractConfig) -> Self {
        let pool = SessionPool::new(Arc::clone(&renderer), config.pool_size);
        Self {
            renderer,
            pool,
            config,
        }
    }

    /// Extract from every URL, preserving input order.
    ///
    /// Items run through the context pool with at most `pool_size` in
    /// flight; output order follows input order regardless of completion
    /// order. Consuming `self` ties renderer teardown to the end of the
    /// one batch this extractor drives; a teardown failure is logged and
    /// does not touch the already-collected results.
    pub async fn run(self, urls: &[String]) -> Vec<BatchItem> {
        let items = stream::iter(urls.iter().cloned())
            .map(|url| self.extract_item(url))
            .buffered(self.config.pool_size.max(1))
            .collect::<Vec<_>>()
            .await;

        if let Err(e) = self.renderer.shutdown().await {
            warn!("renderer teardown failed: {e}");
        }
        items
    }

    async fn extract_item(&self, url: String) -> BatchItem {
        debug!("extracting {url}");
        let outcome = match self.try_extract(&url).await {
            Ok((table, image)) => Outcome::Success { table, image },
            Err(error) => {
                warn!("extraction failed for {url}: {error}");
                Outcome::Failure { error }
            }
        };
        BatchItem { url, outcome }
    }

    async fn try_extract(
        &self,
        url: &str,
    ) -> Result<(Table, Option<ImageCandidate>), ExtractError> {
        let mut session = self
            .pool
            .lease()
            .await
            .map_err(|e| ExtractError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let result = self.render_and_decode(session.context_mut(), url).await;

        // The lease ends here on success and failure alike.
        if let Err(e) = self.pool.dispose(session).await {
            warn!("context teardown failed for {url}: {e}");
        }
        result
    }

    async fn render_and_decode(
        &self,
        context: &mut dyn RenderContext,
        url: &str,
    ) -> Result<(Table, Option<ImageCandidate>), ExtractError> {
        let page = renderer::render_page(
            context,
            url,
            self.config.navigation_timeout_ms,
            &self.config.ready_wait,
        )
        .await
        .map_err(|e| ExtractError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !page.ready {
            return Err(ExtractError::RenderTimeout {
                url: url.to_string(),
                timeout_ms: self.config.ready_wait.ceiling_ms(),
            });
        }

        extract::extract_document(
            &page.html,
            &page.url,
            &self.config.table_id,
            self.config.resolve_image,
        )
    }
}

/// Extract the identified table, and optionally a profile image, from each
/// URL.
///
/// Launches a stealth chromium renderer with default configuration, runs
/// the batch through it, and tears it down. Only a launch failure errors;
/// per-URL failures are carried inside the returned items.
pub async fn extract(
    urls: &[String],
    table_id: &str,
    resolve_image: bool,
) -> Result<Vec<BatchItem>> {
    let renderer = Arc::new(ChromeRenderer::launch().await?);
    let config = ExtractConfig::new(table_id).with_image(resolve_image);
    Ok(BatchExtractor::new(renderer, config).run(urls).await)
}

/// Single-URL convenience wrapper over a one-element batch.
pub async fn extract_one(url: &str, table_id: &str, resolve_image: bool) -> Result<BatchItem> {
    let mut items = extract(&[url.to_string()], table_id, resolve_image).await?;
    Ok(items.remove(0))
}

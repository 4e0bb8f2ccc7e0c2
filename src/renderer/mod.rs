//! Rendering collaborator seam.
//!
//! A `Renderer` owns one browser-level resource and hands out exclusively
//! owned `RenderContext`s; a context navigates, evaluates script, and
//! yields the rendered document. The extraction core never touches these
//! traits beyond the rendered HTML they produce, which is what makes the
//! batch driver testable against a canned implementation.

pub mod chrome;

#[cfg(test)]
pub mod mock;

use crate::config::ReadyWait;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// URL the context ended up on after redirects.
    pub final_url: String,
    /// Wall-clock navigation time.
    pub load_time_ms: u64,
}

/// A rendered page: the URL it was requested for, its DOM serialization
/// after script execution, and whether the readiness strategy was
/// satisfied. Consumed by exactly one extraction pass, never mutated.
#[derive(Debug, Clone)]
pub struct PageHandle {
    pub url: String,
    pub html: String,
    pub ready: bool,
}

/// Browser-level resource shared by a batch.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh rendering context, exclusively owned by the caller.
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;

    /// Tear the browser-level resource down. A batch calls this exactly
    /// once, after its last item.
    async fn shutdown(&self) -> Result<()>;
}

/// One navigable rendering context (a tab, in browser terms).
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate to `url`, bounded by `timeout_ms`.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;

    /// Evaluate a script in the page and return its JSON value.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Current DOM serialization of the page.
    async fn content(&self) -> Result<String>;

    /// Close the context, releasing its browser-side resources.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Apply the configured readiness strategy; true when the page is ready.
///
/// The document-ready predicate polls `document.readyState` under a
/// bounded ceiling; probe errors count as not-ready and the poll keeps
/// going until the ceiling. The fixed-delay proxy always reports ready
/// after sleeping.
pub async fn await_ready(context: &dyn RenderContext, wait: &ReadyWait) -> bool {
    match *wait {
        ReadyWait::FixedDelay { delay_ms } => {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            true
        }
        ReadyWait::DocumentReady {
            timeout_ms,
            poll_interval_ms,
        } => {
            let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
            loop {
                let state = context.execute_js("document.readyState").await.ok();
                if state.as_ref().and_then(|v| v.as_str()) == Some("complete") {
                    return true;
                }
                if tokio::time::Instant::now() >= deadline {
                    return false;
                }
                tokio::time::sleep(Duration::from_millis(poll_interval_ms)).await;
            }
        }
    }
}

/// Navigate a context and wait for readiness, producing the page handle.
///
/// A handle with `ready: false` carries no markup; the caller decides what
/// a missed readiness ceiling means (for the batch driver: RenderTimeout).
pub async fn render_page(
    context: &mut dyn RenderContext,
    url: &str,
    navigation_timeout_ms: u64,
    wait: &ReadyWait,
) -> Result<PageHandle> {
    context.navigate(url, navigation_timeout_ms).await?;
    let ready = await_ready(context, wait).await;
    let html = if ready {
        context.content().await?
    } else {
        String::new()
    };
    Ok(PageHandle {
        url: url.to_string(),
        html,
        ready,
    })
}

//! tablehawk: lift one identified stats table out of JS-rendered pages.
//!
//! A batch of page URLs goes in; an ordered sequence of per-URL outcomes
//! comes out. Each page is rendered by a headless browser (scripts
//! executed, automation signals suppressed), its markup is sanitized to
//! expose comment-wrapped tables, the target table is located by exact id
//! and decoded into rows of named columns, and optionally a profile-image
//! URL is resolved through a fixed fallback chain. One page failing never
//! aborts the batch: failed items carry a typed error instead of a table.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! let urls = vec!["https://example.com/squad".to_string()];
//! let items = tablehawk::extract(&urls, "stats", true).await?;
//! for item in &items {
//!     println!("{}: {:?}", item.url, item.outcome);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod pool;
pub mod renderer;
pub mod stealth;

pub use batch::driver::{extract, extract_one, BatchExtractor, BatchItem, Outcome};
pub use config::{ExtractConfig, ReadyWait};
pub use error::ExtractError;
pub use extract::decode::Table;
pub use extract::image::{ImageCandidate, ImageSource};
pub use renderer::chrome::ChromeRenderer;
pub use renderer::{PageHandle, RenderContext, Renderer};

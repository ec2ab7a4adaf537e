//! # pagelens
//!
//! Headless page-automation core for AI agents: semantic snapshots and
//! declarative DOM actions behind a uniform command protocol.
//!
//! ## Overview
//!
//! The core owns a live document and exposes a command dispatcher that
//! accepts structured requests and returns structured, self-describing
//! responses carrying either data or rich error diagnostics:
//!
//! - **Snapshots**: compact, accessibility-oriented text renderings of the
//!   page in four modes (interactive, outline, content, extract), with
//!   opaque `@ref:N` element handles usable as selectors
//! - **Actions**: click, type, fill, check, select, hover, scroll, key
//!   presses, waiting, and validation, each with realistic event
//!   sequences and verified post-conditions
//! - **Recovery**: failed resolutions come back with similar selectors,
//!   nearby interactive elements, and the actions an element supports
//!
//! ## Quick start
//!
//! ```rust
//! use pagelens::dispatch::{Command, CommandDispatcher};
//! use pagelens::page::PageState;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut page = PageState::from_html(
//!     "<html><body><button id=\"go\">Go</button></body></html>",
//!     "https://example.com",
//! );
//! let mut dispatcher = CommandDispatcher::new();
//!
//! let snapshot = dispatcher
//!     .dispatch(Command::new("snapshot"), &mut page)
//!     .await;
//! assert!(snapshot.success);
//!
//! let click = dispatcher
//!     .dispatch(
//!         Command::new("click").arg("selector", json!("#go")),
//!         &mut page,
//!     )
//!     .await;
//! assert!(click.success);
//! # }
//! ```
//!
//! ## Module structure
//!
//! - [`dom`]: the headless document the core consumes (parsing, events,
//!   styles, layout rects)
//! - [`query`]: selector resolution (refs, XPath with unions, CSS)
//! - [`snapshot`]: the snapshot engine, ref map, role/name resolution,
//!   visibility, grep
//! - [`actions`]: command executors, capability probe, assertion waiter,
//!   error shaping
//! - [`dispatch`]: command/response envelopes and the dispatcher
//! - [`overlay`]: visual highlight overlay for snapshot refs
//! - [`page`]: per-page session state tying the pieces together

pub mod actions;
pub mod dispatch;
pub mod dom;
pub mod overlay;
pub mod page;
pub mod query;
pub mod snapshot;

pub use dispatch::{Command, CommandDispatcher, Response};
pub use page::PageState;
pub use snapshot::{SnapshotData, SnapshotMode, SnapshotOptions, create_snapshot};

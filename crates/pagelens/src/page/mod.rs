//! Page session state
//!
//! One [`PageState`] per document: the live DOM, the ref map it owns, the
//! last snapshot, and the highlight overlay. Commands execute against this
//! state through the dispatcher. Replacing the document (host navigation)
//! invalidates refs, the snapshot cache, and the overlay together.

use crate::dom::Document;
use crate::overlay::HighlightOverlay;
use crate::snapshot::{RefMap, SnapshotData};

/// Mutable state shared by all commands on one page
#[derive(Debug)]
pub struct PageState {
    /// The live document
    pub document: Document,

    /// Ref map for the current snapshot epoch; owned by the core and not
    /// to be written by external code
    pub refs: RefMap,

    /// The most recent snapshot, used by highlight
    pub last_snapshot: Option<SnapshotData>,

    /// The highlight overlay
    pub overlay: HighlightOverlay,
}

impl PageState {
    /// Wrap an existing document
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            refs: RefMap::new(),
            last_snapshot: None,
            overlay: HighlightOverlay::new(),
        }
    }

    /// Parse HTML and wrap the resulting document
    #[must_use]
    pub fn from_html(html: &str, url: &str) -> Self {
        Self::new(Document::parse(html, url))
    }

    /// Swap in a new document after host navigation.
    ///
    /// All refs, the snapshot cache, and the overlay are invalidated; the
    /// core never persists state across document replacement.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.refs.clear();
        self.last_snapshot = None;
        self.overlay = HighlightOverlay::new();
    }
}

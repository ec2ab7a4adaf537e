//! Element reference system
//!
//! Snapshots hand out opaque handles of the form `@ref:N` that later
//! commands use as selectors. Handles are allocated in first-emitted order
//! and are valid only within the current epoch: every snapshot clears the
//! map and restarts numbering at zero.

use std::collections::HashMap;

use crate::dom::NodeId;

/// Prefix distinguishing refs from other selectors
pub const REF_PREFIX: &str = "@ref:";

/// An opaque element handle (`@ref:N`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u32);

impl ElementRef {
    /// Create a handle from its number
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The numeric part of the handle
    #[must_use]
    pub fn number(self) -> u32 {
        self.0
    }

    /// Whether a selector string uses the ref grammar
    #[must_use]
    pub fn is_ref(selector: &str) -> bool {
        selector.starts_with(REF_PREFIX)
    }

    /// Parse a reference string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `@ref:` followed by decimal
    /// digits.
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s.strip_prefix(REF_PREFIX).ok_or_else(|| {
            format!("Invalid reference format: '{s}'. Expected format: @ref:<number>")
        })?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "Invalid reference format: '{s}'. Expected format: @ref:<number>"
            ));
        }
        digits.parse().map(Self).map_err(|_| {
            format!("Invalid reference format: '{s}'. Expected format: @ref:<number>")
        })
    }
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REF_PREFIX}{}", self.0)
    }
}

/// Bidirectional element/handle mapping for the current snapshot epoch
#[derive(Debug, Default)]
pub struct RefMap {
    by_ref: HashMap<ElementRef, NodeId>,
    by_node: HashMap<NodeId, ElementRef>,
    next: u32,
}

impl RefMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a handle to its element
    #[must_use]
    pub fn get(&self, handle: ElementRef) -> Option<NodeId> {
        self.by_ref.get(&handle).copied()
    }

    /// Parse and resolve a `@ref:N` selector string
    #[must_use]
    pub fn lookup(&self, selector: &str) -> Option<NodeId> {
        ElementRef::parse(selector).ok().and_then(|r| self.get(r))
    }

    /// The handle assigned to an element, if any
    #[must_use]
    pub fn ref_of(&self, node: NodeId) -> Option<ElementRef> {
        self.by_node.get(&node).copied()
    }

    /// Assign a handle to an element, or return the one it already has.
    ///
    /// Numbers are allocated sequentially and never reused within an epoch.
    pub fn generate(&mut self, node: NodeId) -> ElementRef {
        if let Some(existing) = self.by_node.get(&node) {
            return *existing;
        }
        let handle = ElementRef(self.next);
        self.next += 1;
        self.by_ref.insert(handle, node);
        self.by_node.insert(node, handle);
        handle
    }

    /// Bind an explicit handle to an element, replacing both directions
    pub fn set(&mut self, handle: ElementRef, node: NodeId) {
        if let Some(previous) = self.by_ref.insert(handle, node) {
            self.by_node.remove(&previous);
        }
        self.by_node.insert(node, handle);
        if handle.0 >= self.next {
            self.next = handle.0 + 1;
        }
    }

    /// Start a new epoch: drop all handles and restart numbering at zero
    pub fn clear(&mut self) {
        self.by_ref.clear();
        self.by_node.clear();
        self.next = 0;
    }

    /// Number of live handles
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_ref.len()
    }

    /// Whether the map holds no handles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_ref.is_empty()
    }

    /// Iterate handles and their elements, in handle order
    pub fn iter(&self) -> impl Iterator<Item = (ElementRef, NodeId)> + '_ {
        let mut pairs: Vec<(ElementRef, NodeId)> =
            self.by_ref.iter().map(|(r, n)| (*r, *n)).collect();
        pairs.sort_by_key(|(r, _)| *r);
        pairs.into_iter()
    }
}

//! Highlight overlay
//!
//! Visual debug layer for the refs of the last snapshot: a full-document
//! absolutely positioned container holding one border box and numeric
//! label per resolvable ref, positioned through `translate3d` transforms.
//! A passive scroll listener schedules refreshes through a frame throttle;
//! refreshes read every rect before writing any transform. Snapshot
//! walkers recognize the layer by its marker attribute and skip it.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::dom::{Document, ElementData, EventType, ListenerId, NodeId, Rect};
use crate::snapshot::{ElementRef, RefMap, SnapshotData};

#[cfg(test)]
mod tests;

/// Marker attribute identifying the overlay layer
pub(crate) const OVERLAY_ATTR: &str = "data-pagelens-overlay";

const LAYER_STYLE: &str = "position:absolute;top:0;left:0;width:100%;height:100%;\
     pointer-events:none;z-index:2147483647";

const LABEL_STYLE: &str = "position:absolute;top:-18px;left:0;background:#47a3f3;\
     color:#fff;font:11px monospace;padding:0 3px";

/// Overlay lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// No layer installed
    #[default]
    Idle,
    /// Layer installed and tracking refs
    Active,
}

/// The highlight overlay owned by a page session
#[derive(Debug, Default)]
pub struct HighlightOverlay {
    root: Option<NodeId>,
    /// (highlighted element, its box node) pairs
    boxes: Vec<(NodeId, NodeId)>,
    state: OverlayState,
    /// Frame-throttle flag set by the scroll listener
    dirty: Arc<AtomicBool>,
    scroll_listener: Option<ListenerId>,
}

impl HighlightOverlay {
    /// Create an idle overlay
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether the layer is installed
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == OverlayState::Active
    }

    /// Install the layer and add a box for every ref of the snapshot that
    /// still resolves to a connected, laid-out element.
    ///
    /// Returns the number of boxes created. Refs that no longer resolve or
    /// whose element has a zero-area rect are skipped, never reported.
    pub fn show(&mut self, doc: &mut Document, refs: &RefMap, snapshot: &SnapshotData) -> usize {
        self.clear(doc);
        let Some(body) = doc.body() else {
            return 0;
        };

        let mut layer = ElementData::new("div");
        layer.set_attr(OVERLAY_ATTR, "");
        layer.set_attr("style", LAYER_STYLE);
        let root = doc.append_element_data(body, layer);

        let mut handles: Vec<ElementRef> = snapshot
            .refs
            .keys()
            .filter_map(|key| ElementRef::parse(key).ok())
            .collect();
        handles.sort();

        let (scroll_x, scroll_y) = doc.scroll_position();
        let mut count = 0usize;
        for handle in handles {
            let Some(target) = refs.get(handle) else {
                continue;
            };
            if !doc.is_connected(target) {
                continue;
            }
            let rect = doc.bounding_box(target);
            if rect.is_empty() {
                continue;
            }

            let box_node = doc.append_element(root, "div");
            doc.set_attr(box_node, "data-ref", handle.to_string());
            doc.set_attr(
                box_node,
                "style",
                box_style(&rect, scroll_x, scroll_y),
            );
            let label = doc.append_element(box_node, "div");
            doc.set_attr(label, "style", LABEL_STYLE);
            doc.append_text(label, handle.number().to_string());

            self.boxes.push((target, box_node));
            count += 1;
        }

        let dirty = Arc::clone(&self.dirty);
        let listener = doc.add_event_listener(doc.root(), EventType::Scroll, move |_, _| {
            dirty.store(true, Ordering::Relaxed);
        });
        self.scroll_listener = Some(listener);
        self.root = Some(root);
        self.state = OverlayState::Active;
        debug!(boxes = count, "highlight overlay installed");
        count
    }

    /// Run a pending scheduled refresh, if the scroll listener flagged one.
    ///
    /// Any number of scroll events between syncs collapse into a single
    /// refresh, standing in for an animation-frame throttle.
    pub fn sync(&mut self, doc: &mut Document) {
        if self.dirty.swap(false, Ordering::Relaxed) {
            self.refresh(doc);
        }
    }

    /// Recompute every box transform: read all rects, then write all styles
    pub fn refresh(&mut self, doc: &mut Document) {
        if self.state != OverlayState::Active {
            return;
        }
        let (scroll_x, scroll_y) = doc.scroll_position();

        // Read phase
        let reads: Vec<(NodeId, Option<Rect>)> = self
            .boxes
            .iter()
            .map(|&(target, box_node)| {
                let rect = if doc.is_connected(target) {
                    let r = doc.bounding_box(target);
                    (!r.is_empty()).then_some(r)
                } else {
                    None
                };
                (box_node, rect)
            })
            .collect();

        // Write phase
        for (box_node, rect) in reads {
            match rect {
                Some(rect) => {
                    doc.set_attr(box_node, "style", box_style(&rect, scroll_x, scroll_y));
                }
                None => {
                    doc.set_attr(box_node, "style", "display:none");
                }
            }
        }
    }

    /// Remove the layer, cancel any pending frame, and drop the listener.
    /// Safe to call when already idle.
    pub fn clear(&mut self, doc: &mut Document) {
        if let Some(root) = self.root.take() {
            doc.remove(root);
        }
        if let Some(listener) = self.scroll_listener.take() {
            doc.remove_event_listener(listener);
        }
        self.boxes.clear();
        self.dirty.store(false, Ordering::Relaxed);
        self.state = OverlayState::Idle;
    }
}

fn box_style(rect: &Rect, scroll_x: f64, scroll_y: f64) -> String {
    let mut style = String::from("position:absolute;border:2px solid #47a3f3;");
    let _ = write!(
        style,
        "width:{}px;height:{}px;transform:translate3d({}px,{}px,0)",
        rect.width,
        rect.height,
        rect.x - scroll_x,
        rect.y - scroll_y
    );
    style
}

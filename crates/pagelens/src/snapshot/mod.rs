//! Semantic snapshot engine
//!
//! Walks the live document and produces a compact, accessibility-oriented
//! textual representation in four modes (interactive, outline, content,
//! extract), handing out opaque `@ref:N` element handles that later
//! commands use as selectors. Refs are valid only within their snapshot
//! epoch: every capture clears the map and renumbers from zero.

mod capture;
mod content;
mod grep;
mod interactive;
mod outline;
mod reference;
mod role;
mod visibility;

#[cfg(test)]
mod tests;

pub use capture::{
    RefEntry, SnapshotData, SnapshotFormat, SnapshotMetadata, SnapshotMode, SnapshotOptions,
    create_snapshot,
};
pub use grep::{GrepFilter, GrepOptions, GrepSpec};
pub use reference::{ElementRef, REF_PREFIX, RefMap};
pub use role::{
    LabelMap, Role, RoleInfo, StateFlags, accessible_name, resolve as resolve_role_info,
    resolve_role, state_flags,
};
pub use visibility::{bounding_box, has_layout, is_self_visible, is_visible};

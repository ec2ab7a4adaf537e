//! Capability probe
//!
//! A single pure classification drives every compatibility branch in the
//! executors: `classify` maps an element to its kind and capability set,
//! and actions check the capability they need rather than keying on
//! concrete element types.

use crate::dom::{Document, NodeId};

/// Concrete element kind, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<button>` or button-typed input
    Button,
    /// `<a href>`
    Link,
    /// Single-line text input
    TextInput,
    /// `<textarea>`
    TextArea,
    /// Element with `contenteditable`
    ContentEditable,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="radio">`
    Radio,
    /// `<select>`
    Select,
    /// `<option>`
    OptionElement,
    /// Anything else
    Generic,
}

impl ElementKind {
    /// Diagnostic name, used as `actualType` in errors
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::TextInput => "textbox",
            Self::TextArea => "textarea",
            Self::ContentEditable => "contenteditable",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::OptionElement => "option",
            Self::Generic => "generic",
        }
    }
}

/// Abstract permission required by an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Accepts click sequences
    Clickable,
    /// Accepts text entry
    Editable,
    /// Accepts check/uncheck
    Checkable,
    /// Accepts option selection
    Selectable,
    /// Accepts hover sequences
    Hoverable,
    /// Can take focus
    Focusable,
}

impl Capability {
    /// Lowercase capability name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clickable => "clickable",
            Self::Editable => "editable",
            Self::Checkable => "checkable",
            Self::Selectable => "selectable",
            Self::Hoverable => "hoverable",
            Self::Focusable => "focusable",
        }
    }

    /// Parse a requirement name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clickable" => Some(Self::Clickable),
            "editable" => Some(Self::Editable),
            "checkable" => Some(Self::Checkable),
            "selectable" => Some(Self::Selectable),
            "hoverable" => Some(Self::Hoverable),
            "focusable" => Some(Self::Focusable),
            _ => None,
        }
    }
}

/// The result of classifying one element
#[derive(Debug, Clone)]
pub struct Classification {
    /// Concrete kind
    pub kind: ElementKind,
    /// Capabilities the element supports
    pub capabilities: Vec<Capability>,
}

impl Classification {
    /// Whether the element supports a capability
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Capability names, for diagnostics
    #[must_use]
    pub fn capability_names(&self) -> Vec<String> {
        self.capabilities
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }
}

/// Classify an element into its kind and capability set
#[must_use]
pub fn classify(doc: &Document, node: NodeId) -> Classification {
    let Some(el) = doc.element(node) else {
        return Classification {
            kind: ElementKind::Generic,
            capabilities: Vec::new(),
        };
    };

    let kind = if el.has_attr("contenteditable") {
        ElementKind::ContentEditable
    } else {
        match el.tag.as_str() {
            "button" => ElementKind::Button,
            "a" if el.has_attr("href") => ElementKind::Link,
            "textarea" => ElementKind::TextArea,
            "select" => ElementKind::Select,
            "option" => ElementKind::OptionElement,
            "input" => match el.input_type().unwrap_or("text").to_ascii_lowercase().as_str() {
                "checkbox" => ElementKind::Checkbox,
                "radio" => ElementKind::Radio,
                "button" | "submit" | "reset" | "image" => ElementKind::Button,
                _ => ElementKind::TextInput,
            },
            _ => ElementKind::Generic,
        }
    };

    // Any element can carry a click handler, so clickable and hoverable
    // are universal; the narrower capabilities follow the kind.
    let mut capabilities = vec![Capability::Clickable, Capability::Hoverable];
    match kind {
        ElementKind::TextInput | ElementKind::TextArea | ElementKind::ContentEditable => {
            capabilities.push(Capability::Editable);
        }
        ElementKind::Checkbox | ElementKind::Radio => capabilities.push(Capability::Checkable),
        ElementKind::Select => capabilities.push(Capability::Selectable),
        _ => {}
    }
    if doc.is_focusable(node) {
        capabilities.push(Capability::Focusable);
    }

    Classification { kind, capabilities }
}

/// Actions available on an element, derived from its capabilities.
///
/// Every element supports the query/inspect surface; capability grants
/// add the mutating actions.
#[must_use]
pub fn available_actions(classification: &Classification) -> Vec<String> {
    let mut actions: Vec<&str> = vec![
        "querySelector",
        "getText",
        "getAttribute",
        "getProperty",
        "getBoundingBox",
        "isVisible",
        "isEnabled",
        "validateElement",
    ];
    if classification.has(Capability::Clickable) {
        actions.extend(["click", "dblclick"]);
    }
    if classification.has(Capability::Hoverable) {
        actions.push("hover");
    }
    if classification.has(Capability::Editable) {
        actions.extend(["type", "fill", "clear"]);
    }
    if classification.has(Capability::Checkable) {
        actions.extend(["check", "uncheck", "isChecked"]);
    }
    if classification.has(Capability::Selectable) {
        actions.push("select");
    }
    if classification.has(Capability::Focusable) {
        actions.extend(["focus", "blur", "press", "scroll"]);
    }
    actions.into_iter().map(str::to_string).collect()
}

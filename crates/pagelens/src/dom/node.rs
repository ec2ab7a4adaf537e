//! Node storage types for the arena document

use serde::Serialize;

/// Handle to a node in a [`Document`](super::Document) arena.
///
/// Handles are cheap to copy and remain valid for the lifetime of the
/// document; removing a node from the tree disconnects it but does not
/// invalidate handles pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena slot index for this handle
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A client rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no area
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Payload of a node: an element or a run of character data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// An element node
    Element(ElementData),
    /// A text node
    Text(String),
}

impl NodeData {
    /// The element payload, if this node is an element
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }
}

/// Element state: tag, attributes, and the mutable IDL fields actions touch
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,

    /// Attributes in document order
    attrs: Vec<(String, String)>,

    /// Current value (inputs, textareas)
    pub value: Option<String>,

    /// Checkedness (checkboxes, radios)
    pub checked: bool,

    /// Selectedness (options)
    pub selected: bool,

    /// Horizontal scroll offset
    pub scroll_x: f64,

    /// Vertical scroll offset
    pub scroll_y: f64,

    /// Host-supplied layout rectangle, if any
    pub rect: Option<Rect>,
}

impl ElementData {
    /// Create an element with no attributes
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            value: None,
            checked: false,
            selected: false,
            scroll_x: 0.0,
            scroll_y: 0.0,
            rect: None,
        }
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute is present, regardless of value
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Remove an attribute; returns whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    /// Iterate attributes in document order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `id` attribute, if non-empty
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|s| !s.is_empty())
    }

    /// Iterate class tokens
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// The `type` attribute of an input, lowercased comparison is up to the caller
    #[must_use]
    pub fn input_type(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Whether this element is an `<input>` of one of the given types
    #[must_use]
    pub fn is_input_of_type(&self, types: &[&str]) -> bool {
        self.tag == "input"
            && self
                .input_type()
                .is_some_and(|t| types.iter().any(|want| t.eq_ignore_ascii_case(want)))
    }
}

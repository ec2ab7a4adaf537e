//! Role and accessible-name resolution
//!
//! Maps elements to their ARIA role, resolves the human-readable name, and
//! reads the state flags snapshots report. An explicit `role` attribute
//! overrides the tag-implicit role.

use std::collections::HashMap;

use crate::dom::{Document, NodeId, collapse_whitespace};

/// Inferred ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Pressable control
    Button,
    /// Hyperlink
    Link,
    /// Single- or multi-line text entry
    Textbox,
    /// Select or combobox widget
    Combobox,
    /// Checkbox input
    Checkbox,
    /// Radio input
    Radio,
    /// Heading with its level
    Heading(u8),
    /// `main` landmark
    Main,
    /// `banner` landmark
    Banner,
    /// `navigation` landmark
    Navigation,
    /// `complementary` landmark
    Complementary,
    /// `contentinfo` landmark
    ContentInfo,
    /// `region` landmark
    Region,
    /// `search` landmark
    Search,
    /// `form` landmark
    Form,
    /// Ordered or unordered list
    List,
    /// List item
    ListItem,
    /// Preformatted or code block
    Code,
    /// Self-contained composition
    Article,
    /// Menu entry
    MenuItem,
    /// Tab in a tablist
    Tab,
    /// Option in a listbox or select
    OptionItem,
    /// No specific role
    Generic,
}

impl Role {
    /// Uppercase token used in snapshot lines
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Button => "BUTTON",
            Self::Link => "LINK",
            Self::Textbox => "TEXTBOX",
            Self::Combobox => "COMBOBOX",
            Self::Checkbox => "CHECKBOX",
            Self::Radio => "RADIO",
            Self::Heading(_) => "HEADING",
            Self::Main => "MAIN",
            Self::Banner => "BANNER",
            Self::Navigation => "NAVIGATION",
            Self::Complementary => "COMPLEMENTARY",
            Self::ContentInfo => "CONTENTINFO",
            Self::Region => "REGION",
            Self::Search => "SEARCH",
            Self::Form => "FORM",
            Self::List => "LIST",
            Self::ListItem => "LISTITEM",
            Self::Code => "CODE",
            Self::Article => "ARTICLE",
            Self::MenuItem => "MENUITEM",
            Self::Tab => "TAB",
            Self::OptionItem => "OPTION",
            Self::Generic => "GENERIC",
        }
    }

    /// Lowercase role name for sidecar metadata
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Textbox => "textbox",
            Self::Combobox => "combobox",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Heading(_) => "heading",
            Self::Main => "main",
            Self::Banner => "banner",
            Self::Navigation => "navigation",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Region => "region",
            Self::Search => "search",
            Self::Form => "form",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Code => "code",
            Self::Article => "article",
            Self::MenuItem => "menuitem",
            Self::Tab => "tab",
            Self::OptionItem => "option",
            Self::Generic => "generic",
        }
    }

    /// Whether the role marks an element agents act on
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Link
                | Self::Textbox
                | Self::Combobox
                | Self::Checkbox
                | Self::Radio
                | Self::MenuItem
                | Self::Tab
                | Self::OptionItem
        )
    }

    /// Whether the role denotes a top-level semantic region
    #[must_use]
    pub fn is_landmark(self) -> bool {
        matches!(
            self,
            Self::Main
                | Self::Banner
                | Self::Navigation
                | Self::Complementary
                | Self::ContentInfo
                | Self::Region
                | Self::Search
                | Self::Form
        )
    }
}

/// Resolved role, name, and state for one element
#[derive(Debug, Clone)]
pub struct RoleInfo {
    /// The inferred role
    pub role: Role,
    /// The accessible name; empty when none resolves
    pub name: String,
    /// State flags
    pub state: StateFlags,
}

/// State flags reported in snapshot lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateFlags {
    /// Element is disabled
    pub disabled: bool,
    /// Checkbox/radio is checked
    pub checked: bool,
    /// Form control is required
    pub required: bool,
    /// Element is selected
    pub selected: bool,
    /// Expandable element is expanded
    pub expanded: bool,
}

impl StateFlags {
    /// Flags in their stable rendering order
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.disabled {
            flags.push("disabled");
        }
        if self.required {
            flags.push("required");
        }
        if self.checked {
            flags.push("checked");
        }
        if self.selected {
            flags.push("selected");
        }
        if self.expanded {
            flags.push("expanded");
        }
        flags
    }
}

/// Map from control id to label text, built by pre-scanning `<label for>`
#[derive(Debug, Default)]
pub struct LabelMap {
    map: HashMap<String, String>,
}

impl LabelMap {
    /// Scan a document for `<label for="...">` associations
    #[must_use]
    pub fn build(doc: &Document) -> Self {
        let mut map = HashMap::new();
        for node in doc.all_elements() {
            if doc.tag(node) == Some("label")
                && let Some(target) = doc.attr(node, "for")
            {
                let text = collapse_whitespace(&doc.text_content(node));
                if !text.is_empty() {
                    map.entry(target.to_string()).or_insert(text);
                }
            }
        }
        Self { map }
    }

    /// Label text for a control id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(String::as_str)
    }
}

/// Resolve role, accessible name, and state for an element
#[must_use]
pub fn resolve(doc: &Document, node: NodeId, labels: &LabelMap) -> RoleInfo {
    RoleInfo {
        role: resolve_role(doc, node),
        name: accessible_name(doc, node, labels),
        state: state_flags(doc, node),
    }
}

/// Infer the role of an element
#[must_use]
pub fn resolve_role(doc: &Document, node: NodeId) -> Role {
    let Some(el) = doc.element(node) else {
        return Role::Generic;
    };

    if let Some(role_attr) = el.attr("role") {
        let explicit = match role_attr.to_ascii_lowercase().as_str() {
            "button" => Some(Role::Button),
            "link" => Some(Role::Link),
            "textbox" | "searchbox" => Some(Role::Textbox),
            "combobox" | "listbox" => Some(Role::Combobox),
            "checkbox" | "switch" => Some(Role::Checkbox),
            "radio" => Some(Role::Radio),
            "heading" => {
                let level = el
                    .attr("aria-level")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2);
                Some(Role::Heading(level))
            }
            "main" => Some(Role::Main),
            "banner" => Some(Role::Banner),
            "navigation" => Some(Role::Navigation),
            "complementary" => Some(Role::Complementary),
            "contentinfo" => Some(Role::ContentInfo),
            "region" => Some(Role::Region),
            "search" => Some(Role::Search),
            "form" => Some(Role::Form),
            "list" => Some(Role::List),
            "listitem" => Some(Role::ListItem),
            "code" => Some(Role::Code),
            "article" => Some(Role::Article),
            "menuitem" => Some(Role::MenuItem),
            "tab" => Some(Role::Tab),
            "option" => Some(Role::OptionItem),
            _ => None,
        };
        if let Some(role) = explicit {
            return role;
        }
    }

    match el.tag.as_str() {
        "button" => Role::Button,
        "a" => {
            if el.has_attr("href") {
                Role::Link
            } else {
                Role::Generic
            }
        }
        "input" => match el.input_type().unwrap_or("text").to_ascii_lowercase().as_str() {
            "checkbox" => Role::Checkbox,
            "radio" => Role::Radio,
            "button" | "submit" | "reset" | "image" => Role::Button,
            "hidden" => Role::Generic,
            _ => Role::Textbox,
        },
        "select" => Role::Combobox,
        "textarea" => Role::Textbox,
        "h1" => Role::Heading(1),
        "h2" => Role::Heading(2),
        "h3" => Role::Heading(3),
        "h4" => Role::Heading(4),
        "h5" => Role::Heading(5),
        "h6" => Role::Heading(6),
        "main" => Role::Main,
        "header" => Role::Banner,
        "footer" => Role::ContentInfo,
        "nav" => Role::Navigation,
        "aside" => Role::Complementary,
        "section" => Role::Region,
        "form" => Role::Form,
        "ul" | "ol" => Role::List,
        "li" => Role::ListItem,
        "pre" | "code" => Role::Code,
        "article" => Role::Article,
        "option" => Role::OptionItem,
        _ => {
            if el.has_attr("contenteditable") {
                Role::Textbox
            } else {
                Role::Generic
            }
        }
    }
}

/// Resolve the accessible name per the priority chain:
/// `aria-labelledby`, `aria-label`, associated label, text content,
/// button value, placeholder, alt, title. Empty candidates are skipped.
#[must_use]
pub fn accessible_name(doc: &Document, node: NodeId, labels: &LabelMap) -> String {
    let Some(el) = doc.element(node) else {
        return String::new();
    };

    if let Some(ids) = el.attr("aria-labelledby") {
        let mut parts = Vec::new();
        for id in ids.split_whitespace() {
            if let Some(target) = find_by_id(doc, id) {
                let text = collapse_whitespace(&doc.text_content(target));
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
        let joined = parts.join(" ");
        if !joined.is_empty() {
            return joined;
        }
    }

    if let Some(label) = el.attr("aria-label") {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if matches!(el.tag.as_str(), "input" | "textarea" | "select") {
        if let Some(id) = el.id()
            && let Some(text) = labels.get(id)
        {
            return text.to_string();
        }
        let mut current = doc.parent(node);
        while let Some(ancestor) = current {
            if doc.tag(ancestor) == Some("label") {
                let text = collapse_whitespace(&doc.text_content(ancestor));
                if !text.is_empty() {
                    return text;
                }
                break;
            }
            current = doc.parent(ancestor);
        }
    }

    let text = collapse_whitespace(&doc.text_content(node));
    if !text.is_empty() {
        return text;
    }

    if el.is_input_of_type(&["button", "submit", "reset"])
        && let Some(value) = &el.value
        && !value.is_empty()
    {
        return value.clone();
    }

    for attr in ["placeholder", "alt", "title"] {
        if let Some(value) = el.attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    String::new()
}

/// Name for a landmark line: label attributes only, never text content
#[must_use]
pub fn landmark_name(doc: &Document, node: NodeId) -> String {
    let Some(el) = doc.element(node) else {
        return String::new();
    };
    if let Some(ids) = el.attr("aria-labelledby") {
        let mut parts = Vec::new();
        for id in ids.split_whitespace() {
            if let Some(target) = find_by_id(doc, id) {
                let text = collapse_whitespace(&doc.text_content(target));
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
        let joined = parts.join(" ");
        if !joined.is_empty() {
            return joined;
        }
    }
    for attr in ["aria-label", "title"] {
        if let Some(value) = el.attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

/// Read the state flags off the element's IDL state and ARIA attributes
#[must_use]
pub fn state_flags(doc: &Document, node: NodeId) -> StateFlags {
    let Some(el) = doc.element(node) else {
        return StateFlags::default();
    };
    StateFlags {
        disabled: el.has_attr("disabled") || el.attr("aria-disabled") == Some("true"),
        checked: el.checked || el.attr("aria-checked") == Some("true"),
        required: el.has_attr("required"),
        selected: el.selected || el.attr("aria-selected") == Some("true"),
        expanded: el.attr("aria-expanded") == Some("true"),
    }
}

fn find_by_id(doc: &Document, id: &str) -> Option<NodeId> {
    doc.all_elements()
        .into_iter()
        .find(|&n| doc.element(n).and_then(crate::dom::ElementData::id) == Some(id))
}

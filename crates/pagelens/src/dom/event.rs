//! Synthetic input events
//!
//! Actions synthesize realistic event sequences against the headless
//! document. Listeners registered by the host observe them and may mutate
//! the document (a click handler is allowed to remove its own button).

use std::sync::{Arc, Mutex};

use super::NodeId;
use super::Document;

/// Event kinds the core can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Mouse button pressed
    MouseDown,
    /// Mouse button released
    MouseUp,
    /// Click (after down/up)
    Click,
    /// Double click
    DblClick,
    /// Pointer entered the element (non-bubbling)
    MouseEnter,
    /// Pointer moved over the element
    MouseOver,
    /// Key pressed down
    KeyDown,
    /// Printable key pressed
    KeyPress,
    /// Key released
    KeyUp,
    /// Editable value changed incrementally
    Input,
    /// Editable value committed
    Change,
    /// Element gained focus (non-bubbling)
    Focus,
    /// Element lost focus (non-bubbling)
    Blur,
    /// Scroll position changed
    Scroll,
}

impl EventType {
    /// DOM event name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseEnter => "mouseenter",
            Self::MouseOver => "mouseover",
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::KeyUp => "keyup",
            Self::Input => "input",
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Scroll => "scroll",
        }
    }

    /// Whether the event propagates to ancestors
    #[must_use]
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::MouseEnter | Self::Focus | Self::Blur)
    }
}

/// Modifier-key flags carried on mouse and keyboard events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Alt/Option held
    pub alt: bool,
    /// Control held
    pub ctrl: bool,
    /// Meta/Command held
    pub meta: bool,
    /// Shift held
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// A synthetic event travelling through the document
#[derive(Debug, Clone)]
pub struct Event {
    /// The event kind
    pub event_type: EventType,

    /// The node the event was dispatched at
    pub target: NodeId,

    /// Mouse button code: left=0, middle=1, right=2
    pub button: i16,

    /// Click count for mouse events
    pub detail: u32,

    /// Modifier flags
    pub modifiers: Modifiers,

    /// Key value for keyboard events
    pub key: Option<String>,
}

impl Event {
    /// Create an event with default button/detail/modifiers
    #[must_use]
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            button: 0,
            detail: 0,
            modifiers: Modifiers::none(),
            key: None,
        }
    }

    /// Set the mouse button code
    #[must_use]
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Set the click count
    #[must_use]
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    /// Set modifier flags
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the key value
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Callback invoked when an event reaches a node it is registered on.
///
/// The callback receives the document mutably so handlers can change the
/// page in response to input, which is what real pages do.
pub type ListenerFn = dyn FnMut(&mut Document, &Event) + Send;

/// Shared handle to a listener callback
pub type Listener = Arc<Mutex<Box<ListenerFn>>>;

/// Token identifying a registered listener, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

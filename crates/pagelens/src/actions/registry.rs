//! Action registry

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Action;

/// Registry of available command executors
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an executor under its action tag
    pub fn register(&mut self, action: Arc<dyn Action>) {
        self.actions.insert(action.name().to_string(), action);
    }

    /// Look up an executor by action tag
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    /// All registered executors, sorted by name
    #[must_use]
    pub fn list(&self) -> Vec<&Arc<dyn Action>> {
        let mut all: Vec<&Arc<dyn Action>> = self.actions.values().collect();
        all.sort_by_key(|a| a.name());
        all
    }

    /// Number of registered executors
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the full command surface
pub fn register_all_actions(registry: &mut ActionRegistry) {
    // Interaction
    registry.register(Arc::new(super::ClickAction::new()));
    registry.register(Arc::new(super::DblClickAction::new()));
    registry.register(Arc::new(super::TypeAction::new()));
    registry.register(Arc::new(super::FillAction::new()));
    registry.register(Arc::new(super::ClearAction::new()));
    registry.register(Arc::new(super::CheckAction::new()));
    registry.register(Arc::new(super::UncheckAction::new()));
    registry.register(Arc::new(super::SelectAction::new()));
    registry.register(Arc::new(super::FocusAction::new()));
    registry.register(Arc::new(super::BlurAction::new()));
    registry.register(Arc::new(super::HoverAction::new()));
    registry.register(Arc::new(super::ScrollAction::new()));
    registry.register(Arc::new(super::ScrollIntoViewAction::new()));
    registry.register(Arc::new(super::PressAction::new()));
    registry.register(Arc::new(super::KeyDownAction::new()));
    registry.register(Arc::new(super::KeyUpAction::new()));

    // Introspection
    registry.register(Arc::new(super::SnapshotAction::new()));
    registry.register(Arc::new(super::ExtractAction::new()));
    registry.register(Arc::new(super::QuerySelectorAction::new()));
    registry.register(Arc::new(super::QuerySelectorAllAction::new()));
    registry.register(Arc::new(super::GetTextAction::new()));
    registry.register(Arc::new(super::GetAttributeAction::new()));
    registry.register(Arc::new(super::GetPropertyAction::new()));
    registry.register(Arc::new(super::GetBoundingBoxAction::new()));
    registry.register(Arc::new(super::IsVisibleAction::new()));
    registry.register(Arc::new(super::IsEnabledAction::new()));
    registry.register(Arc::new(super::IsCheckedAction::new()));

    // Control
    registry.register(Arc::new(super::WaitAction::new()));
    registry.register(Arc::new(super::EvaluateAction::new()));
    registry.register(Arc::new(super::ValidateElementAction::new()));
    registry.register(Arc::new(super::ValidateRefsAction::new()));
    registry.register(Arc::new(super::HighlightAction::new()));
    registry.register(Arc::new(super::ClearHighlightAction::new()));
}

//! Command dispatcher
//!
//! Parses commands, assigns identities, routes to the registered executor,
//! and renders every outcome into the response envelope. Errors never
//! cross the boundary as panics or raw failures; unknown actions fail
//! terminally.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::command::Command;
use super::response::Response;
use crate::actions::{ActionError, ActionRegistry, register_all_actions};
use crate::page::PageState;

/// Routes commands to their executors
pub struct CommandDispatcher {
    registry: ActionRegistry,
    next_seq: u64,
}

impl CommandDispatcher {
    /// Create a dispatcher with the full command surface registered
    #[must_use]
    pub fn new() -> Self {
        let mut registry = ActionRegistry::new();
        register_all_actions(&mut registry);
        Self {
            registry,
            next_seq: 0,
        }
    }

    /// Enumerate the command surface: (action, description) pairs
    #[must_use]
    pub fn actions(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .list()
            .into_iter()
            .map(|a| (a.name(), a.description()))
            .collect()
    }

    /// Dispatch a command supplied as JSON.
    ///
    /// A payload that does not parse as a command fails with
    /// `INVALID_PARAMETERS` and a null identity.
    pub async fn dispatch_value(&mut self, raw: Value, page: &mut PageState) -> Response {
        match serde_json::from_value::<Command>(raw) {
            Ok(command) => self.dispatch(command, page).await,
            Err(e) => Response::from_action_error(
                Value::Null,
                ActionError::invalid_params(format!("Malformed command: {e}")),
            ),
        }
    }

    /// Dispatch a parsed command
    pub async fn dispatch(&mut self, command: Command, page: &mut PageState) -> Response {
        let id = command.id.clone().unwrap_or_else(|| self.next_id());
        let started = Instant::now();

        let Some(action) = self.registry.get(&command.action) else {
            return Response::from_action_error(
                id,
                ActionError::invalid_params(format!("Unknown action: {}", command.action)),
            );
        };
        let action = Arc::clone(action);

        let args = Value::Object(command.args);
        let result = action.execute(&args, page).await;
        debug!(
            action = %command.action,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "command dispatched"
        );

        match result {
            Ok(data) => Response::ok(id, data),
            Err(error) => Response::from_action_error(id, error),
        }
    }

    /// Monotonic in-process counter combined with a timestamp
    fn next_id(&mut self) -> Value {
        self.next_seq += 1;
        Value::String(format!(
            "cmd-{}-{}",
            Utc::now().timestamp_millis(),
            self.next_seq
        ))
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

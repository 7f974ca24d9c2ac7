// crates/input_core/src/source.rs
use std::collections::HashMap;

use input_shared::Channel;
use tracing::debug;

use crate::action::InputAction;

/// Action map every default binding lives in.
pub const MAIN_MAP: &str = "Main";

/// The host's collection of raw actions: enabled at startup, disabled and
/// disposed at shutdown.
pub trait ActionSource {
    fn enable(&mut self);
    fn disable(&mut self);
    fn dispose(&mut self);
    /// Looks up an action by `"<map>/<action>"` path.
    fn action(&self, path: &str) -> Option<InputAction>;
}

/// In-process action source keyed by path. Clones share action handles, so
/// the host can keep a copy for dispatching input while the binding table
/// owns the other.
#[derive(Default, Clone, Debug)]
pub struct ActionRegistry {
    actions: HashMap<String, InputAction>,
    enabled: bool,
}

impl ActionRegistry {
    /// Registry holding `Main/Click`, `Main/Hold` and `Main/Value0..3`.
    pub fn with_main_actions() -> Self {
        let mut registry = Self::default();
        for channel in Channel::ALL {
            registry.register(&format!("{MAIN_MAP}/{}", channel.name()));
        }
        registry
    }

    pub fn register(&mut self, path: &str) -> InputAction {
        if let Some(action) = self.actions.get(path) {
            return action.clone();
        }
        let action = InputAction::new(path);
        if self.enabled {
            action.enable();
        }
        self.actions.insert(path.to_string(), action.clone());
        action
    }

    pub fn get(&self, path: &str) -> Option<InputAction> {
        self.actions.get(path).cloned()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionSource for ActionRegistry {
    fn enable(&mut self) {
        self.enabled = true;
        for action in self.actions.values() {
            action.enable();
        }
    }

    fn disable(&mut self) {
        self.enabled = false;
        for action in self.actions.values() {
            action.disable();
        }
    }

    fn dispose(&mut self) {
        self.disable();
        debug!(actions = self.actions.len(), "disposing action registry");
        self.actions.clear();
    }

    fn action(&self, path: &str) -> Option<InputAction> {
        self.get(path)
    }
}

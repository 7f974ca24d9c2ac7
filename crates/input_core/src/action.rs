// crates/input_core/src/action.rs
//! Raw engine actions: named handles with started/performed/canceled
//! notification points that observers subscribe to.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use input_shared::{ActionPhase, ActionValue};
use tracing::trace;

/// What a handler receives when an action fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallbackContext {
    pub phase: ActionPhase,
    pub value: ActionValue,
}

type Handler = Rc<dyn Fn(&CallbackContext)>;

struct ActionInner {
    name: String,
    enabled: Cell<bool>,
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, ActionPhase, Handler)>>,
}

/// Shared handle to one raw action. Clones refer to the same action.
#[derive(Clone)]
pub struct InputAction {
    inner: Rc<ActionInner>,
}

impl InputAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ActionInner {
                name: name.into(),
                enabled: Cell::new(false),
                next_id: Cell::new(0),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn enable(&self) {
        self.inner.enabled.set(true);
    }

    pub fn disable(&self) {
        self.inner.enabled.set(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Registers `handler` on one notification point. The handler stays
    /// attached for as long as the returned token lives.
    pub fn subscribe<F>(&self, phase: ActionPhase, handler: F) -> Subscription
    where
        F: Fn(&CallbackContext) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner
            .handlers
            .borrow_mut()
            .push((id, phase, Rc::new(handler)));

        Subscription {
            action: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Delivers a notification to every handler of `phase`, in subscription
    /// order. Returns false if the action is disabled and nothing was delivered.
    pub fn trigger(&self, phase: ActionPhase, value: ActionValue) -> bool {
        if !self.is_enabled() {
            trace!(action = %self.inner.name, ?phase, "dropping notification for disabled action");
            return false;
        }

        // Handlers may detach themselves or others while we dispatch.
        let targets: Vec<Handler> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .filter(|(_, p, _)| *p == phase)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();

        let ctx = CallbackContext { phase, value };
        for handler in targets {
            handler(&ctx);
        }
        true
    }

    pub fn handler_count(&self, phase: ActionPhase) -> usize {
        self.inner
            .handlers
            .borrow()
            .iter()
            .filter(|(_, p, _)| *p == phase)
            .count()
    }

    pub fn same_action(&self, other: &InputAction) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAction")
            .field("name", &self.inner.name)
            .field("enabled", &self.inner.enabled.get())
            .field("handlers", &self.inner.handlers.borrow().len())
            .finish()
    }
}

/// Detaches its handler when dropped.
#[must_use = "dropping a Subscription detaches the handler immediately"]
pub struct Subscription {
    action: Weak<ActionInner>,
    id: u64,
}

impl Subscription {
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(action) = self.action.upgrade() {
            action.handlers.borrow_mut().retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({})", self.id)
    }
}

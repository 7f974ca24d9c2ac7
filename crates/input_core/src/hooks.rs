// crates/input_core/src/hooks.rs
//! Host lifecycle notification points: the global pre-update hook that runs
//! before input is dispatched each frame, and the application-quit hook.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

type Callback = Rc<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookPoint {
    BeforeUpdate,
    Quit,
}

#[derive(Default)]
struct HooksInner {
    next_id: Cell<u64>,
    before_update: RefCell<Vec<(u64, Callback)>>,
    quit: RefCell<Vec<(u64, Callback)>>,
    quitting: Cell<bool>,
}

impl HooksInner {
    fn list(&self, point: HookPoint) -> &RefCell<Vec<(u64, Callback)>> {
        match point {
            HookPoint::BeforeUpdate => &self.before_update,
            HookPoint::Quit => &self.quit,
        }
    }

    fn add(self: &Rc<Self>, point: HookPoint, callback: Callback) -> HookToken {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.list(point).borrow_mut().push((id, callback));
        HookToken {
            hooks: Rc::downgrade(self),
            point,
            id,
        }
    }

    fn fire(&self, point: HookPoint) -> usize {
        let callbacks: Vec<Callback> = self
            .list(point)
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }
}

/// Clonable handle to the host's lifecycle hooks.
#[derive(Clone, Default)]
pub struct FrameHooks {
    inner: Rc<HooksInner>,
}

impl FrameHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_update<F: Fn() + 'static>(&self, callback: F) -> HookToken {
        self.inner.add(HookPoint::BeforeUpdate, Rc::new(callback))
    }

    pub fn on_quit<F: Fn() + 'static>(&self, callback: F) -> HookToken {
        self.inner.add(HookPoint::Quit, Rc::new(callback))
    }

    /// Runs every pre-update callback. The host calls this once per frame,
    /// before any input notification of that frame.
    pub fn before_update(&self) {
        let fired = self.inner.fire(HookPoint::BeforeUpdate);
        trace!(fired, "before-update hooks");
    }

    /// Runs the quit callbacks. Only the first call has any effect.
    pub fn quit(&self) {
        if self.inner.quitting.replace(true) {
            return;
        }
        let fired = self.inner.fire(HookPoint::Quit);
        debug!(fired, "application quitting");
    }

    pub fn is_quitting(&self) -> bool {
        self.inner.quitting.get()
    }

    pub fn before_update_count(&self) -> usize {
        self.inner.before_update.borrow().len()
    }

    pub fn quit_count(&self) -> usize {
        self.inner.quit.borrow().len()
    }
}

/// Removes its callback from the hook point when dropped.
#[must_use = "dropping a HookToken deregisters the callback immediately"]
pub struct HookToken {
    hooks: Weak<HooksInner>,
    point: HookPoint,
    id: u64,
}

impl Drop for HookToken {
    fn drop(&mut self) {
        if let Some(hooks) = self.hooks.upgrade() {
            hooks.list(self.point).borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for HookToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HookToken({:?}:{})", self.point, self.id)
    }
}

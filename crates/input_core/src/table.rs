// crates/input_core/src/table.rs
//! The fixed set of six channels, bound to raw actions for the lifetime of
//! the host application.

use std::cell::RefCell;
use std::rc::Rc;

use input_shared::{Channel, InputSnapshot};
use tracing::{debug, error, info, warn};

use crate::action::InputAction;
use crate::config::InputConfig;
use crate::error::{InputError, Result};
use crate::hooks::{FrameHooks, HookToken};
use crate::source::ActionSource;
use crate::state::{InputState, Link};

/// A channel's state paired with the raw action it listens to.
/// The action handle is borrowed from the source, the state is owned here.
/// Only the table creates entries, so every link lives in exactly one of them.
pub(crate) struct BindingEntry {
    channel: Channel,
    action: Option<InputAction>,
    state: Rc<InputState>,
    link: Option<Link>,
}

impl BindingEntry {
    pub fn new(channel: Channel, action: Option<InputAction>, state: Rc<InputState>) -> Self {
        Self {
            channel,
            action,
            state,
            link: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }

    /// Attaches or detaches the channel. Linking an already linked entry
    /// keeps the existing link; unlinking an unlinked entry does nothing.
    pub fn set_linked(&mut self, enable: bool) -> Result<()> {
        if enable {
            if self.link.is_some() {
                warn!(channel = self.channel.name(), "already linked");
                return Ok(());
            }
            self.link = Some(self.state.link(self.action.as_ref())?);
            return Ok(());
        }

        if self.action.is_none() {
            error!(channel = self.channel.name(), "input action is missing, cannot unlink");
            return Err(InputError::missing_action(self.channel.name()));
        }
        if let Some(link) = self.link.take() {
            link.unlink();
        }
        Ok(())
    }
}

#[derive(Default)]
struct TableInner {
    source: Option<Box<dyn ActionSource>>,
    entries: Vec<BindingEntry>,
    reset_hook: Option<HookToken>,
    quit_hook: Option<HookToken>,
}

impl TableInner {
    fn reset_transient(&self) {
        for entry in &self.entries {
            entry.state.reset_transient();
        }
    }

    /// Returns false if there was nothing left to tear down.
    fn teardown(&mut self) -> bool {
        if self.source.is_none() && self.entries.is_empty() {
            return false;
        }

        for entry in self.entries.iter_mut().filter(|e| e.is_linked()) {
            if let Err(err) = entry.set_linked(false) {
                warn!(channel = entry.channel.name(), %err, "linked entry failed to unlink");
            }
        }

        self.reset_hook = None;
        self.quit_hook = None;

        if let Some(mut source) = self.source.take() {
            source.disable();
            source.dispose();
        }
        self.entries.clear();
        info!("input bindings shut down");
        true
    }
}

/// Owns the six input channels and their lifecycle.
///
/// Game systems read channels through the accessors; only the raw action
/// callbacks and the pre-update reset ever mutate them.
pub struct InputBindingTable {
    channels: [Rc<InputState>; 6],
    inner: Rc<RefCell<TableInner>>,
}

impl InputBindingTable {
    /// Enables `source`, binds every channel to its configured action and
    /// registers the pre-update reset and the quit teardown with `hooks`.
    /// Channels whose action is missing are reported and left unlinked.
    pub fn initialize<S>(mut source: S, hooks: &FrameHooks, config: &InputConfig) -> Self
    where
        S: ActionSource + 'static,
    {
        source.enable();

        let channels = Channel::ALL.map(|c| Rc::new(InputState::new(c.name(), c.kind())));

        let mut entries: Vec<BindingEntry> = Channel::ALL
            .iter()
            .map(|&channel| {
                let path = config.action_path(channel);
                let action = source.action(&path);
                if action.is_none() {
                    warn!(channel = channel.name(), %path, "no action registered at path");
                }
                BindingEntry::new(channel, action, Rc::clone(&channels[channel.index()]))
            })
            .collect();

        let mut linked = 0;
        for entry in &mut entries {
            if entry.set_linked(true).is_ok() {
                linked += 1;
            }
        }

        let inner = Rc::new(RefCell::new(TableInner {
            source: Some(Box::new(source)),
            entries,
            ..Default::default()
        }));

        let weak = Rc::downgrade(&inner);
        let reset_hook = hooks.on_before_update(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow().reset_transient();
            }
        });

        let weak = Rc::downgrade(&inner);
        let quit_hook = hooks.on_quit(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().teardown();
            }
        });

        {
            let mut inner = inner.borrow_mut();
            inner.reset_hook = Some(reset_hook);
            inner.quit_hook = Some(quit_hook);
        }

        info!(linked, total = Channel::ALL.len(), "input bindings initialized");
        Self { channels, inner }
    }

    /// Unlinks every linked channel, drops the hooks and disposes the source.
    pub fn shutdown(&self) {
        if !self.inner.borrow_mut().teardown() {
            warn!("input bindings already shut down");
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().source.is_some()
    }

    /// Clears Click/Hold flags. The pre-update hook calls this every frame.
    pub fn reset_transient(&self) {
        self.inner.borrow().reset_transient();
    }

    pub fn linked_count(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.is_linked())
            .count()
    }

    pub fn channel(&self, channel: Channel) -> &InputState {
        &self.channels[channel.index()]
    }

    /// Shared read-only handle for systems that keep a channel around.
    pub fn share(&self, channel: Channel) -> Rc<InputState> {
        Rc::clone(&self.channels[channel.index()])
    }

    pub fn click(&self) -> &InputState {
        self.channel(Channel::Click)
    }

    pub fn hold(&self) -> &InputState {
        self.channel(Channel::Hold)
    }

    pub fn value0(&self) -> &InputState {
        self.channel(Channel::Value0)
    }

    pub fn value1(&self) -> &InputState {
        self.channel(Channel::Value1)
    }

    pub fn value2(&self) -> &InputState {
        self.channel(Channel::Value2)
    }

    pub fn value3(&self) -> &InputState {
        self.channel(Channel::Value3)
    }

    pub fn snapshot(&self, frame: u64) -> InputSnapshot {
        InputSnapshot {
            frame,
            click: self.click().bool_value(),
            hold: self.hold().bool_value(),
            value0: self.value0().bool_value(),
            value1: self.value1().scalar_value(),
            value2: self.value2().vector2_value(),
            value3: self.value3().vector3_value(),
        }
    }
}

impl Drop for InputBindingTable {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            if inner.teardown() {
                debug!("input bindings dropped without shutdown");
            }
        }
    }
}

// crates/input_demo/src/host_loop.rs

use std::time::Instant;

use crossbeam_channel::Receiver;
use input_core::{ActionPhase, ActionRegistry, ActionValue, FrameHooks};
use tracing::{trace, warn};

/// A raw device event addressed to an action path.
#[derive(Debug, Clone)]
pub struct RawInputEvent {
    pub action: String,
    pub phase: ActionPhase,
    pub value: ActionValue,
}

/// Owns the host side of the frame: lifecycle hooks, the raw event queue and
/// the action handles events are dispatched to.
pub struct HostLoop {
    hooks: FrameHooks,
    actions: ActionRegistry,
    events: Receiver<RawInputEvent>,
    frame: u64,
    last_frame_time: Instant,
}

impl HostLoop {
    pub fn new(
        hooks: FrameHooks,
        actions: ActionRegistry,
        events: Receiver<RawInputEvent>,
    ) -> Self {
        Self {
            hooks,
            actions,
            events,
            frame: 0,
            last_frame_time: Instant::now(),
        }
    }

    /// Update the frame timer and return the clamped frame delta.
    pub fn tick_timer(&mut self) -> f32 {
        let now = Instant::now();
        let frame_dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        frame_dt.min(0.25)
    }

    /// Runs the pre-update hooks, then delivers every queued event. Game code
    /// reads input after this returns.
    pub fn run_frame(&mut self) -> u64 {
        self.frame += 1;
        self.hooks.before_update();

        for event in self.events.try_iter() {
            match self.actions.get(&event.action) {
                Some(action) => {
                    let delivered = action.trigger(event.phase, event.value);
                    trace!(
                        frame = self.frame,
                        action = %event.action,
                        phase = ?event.phase,
                        delivered
                    );
                }
                None => warn!(action = %event.action, "event for unknown action dropped"),
            }
        }

        self.frame
    }

    pub fn quit(&self) {
        self.hooks.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_core::{ActionSource, Channel, InputBindingTable, InputConfig};

    #[test]
    fn events_arrive_after_reset() {
        let registry = ActionRegistry::with_main_actions();
        let hooks = FrameHooks::new();
        let config = InputConfig::default();
        let table = InputBindingTable::initialize(registry.clone(), &hooks, &config);
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut host = HostLoop::new(hooks, registry, rx);

        tx.send(RawInputEvent {
            action: "Main/Click".into(),
            phase: ActionPhase::Performed,
            value: ActionValue::Button(true),
        })
        .expect("queue open");

        assert_eq!(host.run_frame(), 1);
        assert!(table.channel(Channel::Click).bool_value());

        assert_eq!(host.run_frame(), 2);
        assert!(!table.channel(Channel::Click).bool_value());
    }

    #[test]
    fn quit_tears_down_bindings() {
        let registry = ActionRegistry::with_main_actions();
        let hooks = FrameHooks::new();
        let config = InputConfig::default();
        let table = InputBindingTable::initialize(registry.clone(), &hooks, &config);
        let (_tx, rx) = crossbeam_channel::unbounded();
        let host = HostLoop::new(hooks, registry.clone(), rx);

        host.quit();

        assert!(!table.is_active());
        assert!(registry.action("Main/Click").is_some_and(|a| !a.is_enabled()));
    }
}

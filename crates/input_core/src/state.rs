// crates/input_core/src/state.rs
//! Cached per-channel input state and its reactions to raw notifications.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use input_shared::{ActionPhase, InputKind};
use tracing::{debug, error, warn};

use crate::action::{CallbackContext, InputAction, Subscription};
use crate::error::{InputError, Result};

/// What a channel does with one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    SetTrue,
    SetFalse,
    ReadScalar,
    ReadVector2,
    ReadVector3,
}

const NO_REACTIONS: &[(ActionPhase, Reaction)] = &[];

const PRESS: &[(ActionPhase, Reaction)] = &[(ActionPhase::Performed, Reaction::SetTrue)];

const LEVEL: &[(ActionPhase, Reaction)] = &[
    (ActionPhase::Performed, Reaction::SetTrue),
    (ActionPhase::Canceled, Reaction::SetFalse),
];

const SCALAR: &[(ActionPhase, Reaction)] = &[
    (ActionPhase::Started, Reaction::ReadScalar),
    (ActionPhase::Performed, Reaction::ReadScalar),
    (ActionPhase::Canceled, Reaction::ReadScalar),
];

const VECTOR2: &[(ActionPhase, Reaction)] = &[
    (ActionPhase::Started, Reaction::ReadVector2),
    (ActionPhase::Performed, Reaction::ReadVector2),
    (ActionPhase::Canceled, Reaction::ReadVector2),
];

const VECTOR3: &[(ActionPhase, Reaction)] = &[
    (ActionPhase::Started, Reaction::ReadVector3),
    (ActionPhase::Performed, Reaction::ReadVector3),
    (ActionPhase::Canceled, Reaction::ReadVector3),
];

/// The notification points a kind subscribes to and how it reacts to each.
pub fn reactions_for(kind: InputKind) -> &'static [(ActionPhase, Reaction)] {
    match kind {
        InputKind::None => NO_REACTIONS,
        InputKind::Click | InputKind::Hold => PRESS,
        InputKind::ValueBool => LEVEL,
        InputKind::ValueScalar => SCALAR,
        InputKind::Value2D => VECTOR2,
        InputKind::Value3D => VECTOR3,
    }
}

/// Cached value of one logical channel.
///
/// Only the accessor matching `kind()` is meaningful, the rest stay at
/// their defaults.
#[derive(Debug)]
pub struct InputState {
    name: &'static str,
    kind: InputKind,
    reactions: &'static [(ActionPhase, Reaction)],
    bool_value: Cell<bool>,
    scalar_value: Cell<f32>,
    vector2_value: Cell<Vec2>,
    vector3_value: Cell<Vec3>,
}

impl InputState {
    pub fn new(name: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            kind,
            reactions: reactions_for(kind),
            bool_value: Cell::new(false),
            scalar_value: Cell::new(0.0),
            vector2_value: Cell::new(Vec2::ZERO),
            vector3_value: Cell::new(Vec3::ZERO),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn bool_value(&self) -> bool {
        self.bool_value.get()
    }

    pub fn scalar_value(&self) -> f32 {
        self.scalar_value.get()
    }

    pub fn vector2_value(&self) -> Vec2 {
        self.vector2_value.get()
    }

    pub fn vector3_value(&self) -> Vec3 {
        self.vector3_value.get()
    }

    /// Subscribes this channel's reactions to `action`. The returned link
    /// detaches every handler when unlinked or dropped.
    pub(crate) fn link(self: &Rc<Self>, action: Option<&InputAction>) -> Result<Link> {
        let Some(action) = action else {
            error!(channel = self.name, "input action is missing, cannot link");
            return Err(InputError::missing_action(self.name));
        };

        let subscriptions = self
            .reactions
            .iter()
            .map(|&(phase, reaction)| {
                let state = Rc::clone(self);
                action.subscribe(phase, move |ctx| state.react(reaction, ctx))
            })
            .collect::<Vec<_>>();

        debug!(
            channel = self.name,
            action = action.name(),
            handlers = subscriptions.len(),
            "linked"
        );
        Ok(Link {
            channel: self.name,
            subscriptions,
        })
    }

    /// Clears a Click/Hold flag. Runs once per frame before input is dispatched.
    pub(crate) fn reset_transient(&self) {
        if self.kind.is_transient() && self.bool_value.get() {
            self.bool_value.set(false);
        }
    }

    fn react(&self, reaction: Reaction, ctx: &CallbackContext) {
        match reaction {
            Reaction::SetTrue => self.bool_value.set(true),
            Reaction::SetFalse => self.bool_value.set(false),
            Reaction::ReadScalar => match ctx.value.read_scalar() {
                Some(v) => self.scalar_value.set(v),
                None => self.mismatch(ctx),
            },
            Reaction::ReadVector2 => match ctx.value.read_vector2() {
                Some(v) => self.vector2_value.set(v),
                None => self.mismatch(ctx),
            },
            Reaction::ReadVector3 => match ctx.value.read_vector3() {
                Some(v) => self.vector3_value.set(v),
                None => self.mismatch(ctx),
            },
        }
    }

    fn mismatch(&self, ctx: &CallbackContext) {
        warn!(
            channel = self.name,
            kind = ?self.kind,
            phase = ?ctx.phase,
            value = ?ctx.value,
            "reading does not match channel kind, keeping previous value"
        );
    }
}

/// Handlers attached by [`InputState::link`].
#[must_use = "dropping a Link unlinks the channel immediately"]
#[derive(Debug)]
pub(crate) struct Link {
    channel: &'static str,
    subscriptions: Vec<Subscription>,
}

impl Link {
    #[cfg(test)]
    fn handler_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub(crate) fn unlink(self) {
        debug!(channel = self.channel, handlers = self.subscriptions.len(), "unlinked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::ActionValue;

    fn enabled_action() -> InputAction {
        let action = InputAction::new("Main/Test");
        action.enable();
        action
    }

    fn state(kind: InputKind) -> Rc<InputState> {
        Rc::new(InputState::new("Test", kind))
    }

    #[test]
    fn click_is_true_for_one_frame() {
        let action = enabled_action();
        let click = state(InputKind::Click);
        let _link = click.link(Some(&action)).expect("link");

        click.reset_transient();
        action.trigger(ActionPhase::Performed, ActionValue::Button(true));
        assert!(click.bool_value());

        click.reset_transient();
        assert!(!click.bool_value());
    }

    #[test]
    fn hold_behaves_like_click() {
        let action = enabled_action();
        let hold = state(InputKind::Hold);
        let _link = hold.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Started, ActionValue::Button(true));
        assert!(!hold.bool_value());
        action.trigger(ActionPhase::Performed, ActionValue::Button(true));
        assert!(hold.bool_value());
        action.trigger(ActionPhase::Canceled, ActionValue::Button(false));
        assert!(hold.bool_value());

        hold.reset_transient();
        assert!(!hold.bool_value());
    }

    #[test]
    fn reset_is_idempotent() {
        let click = state(InputKind::Click);
        click.reset_transient();
        assert!(!click.bool_value());
        click.reset_transient();
        assert!(!click.bool_value());
    }

    #[test]
    fn value_bool_tracks_level_across_resets() {
        let action = enabled_action();
        let level = state(InputKind::ValueBool);
        let _link = level.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Performed, ActionValue::Button(true));
        level.reset_transient();
        level.reset_transient();
        assert!(level.bool_value());

        action.trigger(ActionPhase::Canceled, ActionValue::Button(false));
        level.reset_transient();
        assert!(!level.bool_value());
    }

    #[test]
    fn value_bool_ignores_started() {
        let action = enabled_action();
        let level = state(InputKind::ValueBool);
        let _link = level.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Started, ActionValue::Button(true));
        assert!(!level.bool_value());

        action.trigger(ActionPhase::Performed, ActionValue::Button(true));
        action.trigger(ActionPhase::Started, ActionValue::Button(false));
        assert!(level.bool_value());
    }

    #[test]
    fn scalar_follows_every_phase() {
        let action = enabled_action();
        let scalar = state(InputKind::ValueScalar);
        let _link = scalar.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Started, ActionValue::Scalar(0.5));
        assert_eq!(scalar.scalar_value(), 0.5);

        action.trigger(ActionPhase::Performed, ActionValue::Scalar(0.75));
        scalar.reset_transient();
        assert_eq!(scalar.scalar_value(), 0.75);

        action.trigger(ActionPhase::Canceled, ActionValue::Scalar(0.0));
        assert_eq!(scalar.scalar_value(), 0.0);
    }

    #[test]
    fn vectors_reset_to_neutral_on_cancel() {
        let action = enabled_action();
        let stick = state(InputKind::Value2D);
        let tilt = state(InputKind::Value3D);
        let _a = stick.link(Some(&action)).expect("link");
        let _b = tilt.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Performed, ActionValue::Vector2(Vec2::new(0.6, -0.8)));
        assert_eq!(stick.vector2_value(), Vec2::new(0.6, -0.8));

        action.trigger(ActionPhase::Performed, ActionValue::Vector3(Vec3::Z));
        assert_eq!(tilt.vector3_value(), Vec3::Z);

        action.trigger(ActionPhase::Canceled, ActionValue::None);
        assert_eq!(stick.vector2_value(), Vec2::ZERO);
        assert_eq!(tilt.vector3_value(), Vec3::ZERO);
    }

    #[test]
    fn mismatched_reading_keeps_value() {
        let action = enabled_action();
        let scalar = state(InputKind::ValueScalar);
        let _link = scalar.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Performed, ActionValue::Scalar(0.3));
        action.trigger(ActionPhase::Performed, ActionValue::Vector2(Vec2::ONE));
        assert_eq!(scalar.scalar_value(), 0.3);
    }

    #[test]
    fn unlinked_channel_ignores_notifications() {
        let action = enabled_action();
        let click = state(InputKind::Click);
        let link = click.link(Some(&action)).expect("link");
        link.unlink();

        action.trigger(ActionPhase::Performed, ActionValue::Button(true));

        assert!(!click.bool_value());
        assert_eq!(action.handler_count(ActionPhase::Performed), 0);
    }

    #[test]
    fn missing_action_is_reported_and_state_untouched() {
        let click = state(InputKind::Click);
        let err = click.link(None).unwrap_err();

        assert!(matches!(err, InputError::MissingAction { ref channel } if channel == "Test"));
        assert!(!click.bool_value());
    }

    #[test]
    fn subscriptions_match_kind_table() {
        let cases = [
            (InputKind::None, 0),
            (InputKind::Click, 1),
            (InputKind::Hold, 1),
            (InputKind::ValueBool, 2),
            (InputKind::ValueScalar, 3),
            (InputKind::Value2D, 3),
            (InputKind::Value3D, 3),
        ];
        for (kind, expected) in cases {
            let action = enabled_action();
            let link = state(kind).link(Some(&action)).expect("link");
            assert_eq!(link.handler_count(), expected, "{kind:?}");
        }
    }

    #[test]
    fn none_kind_is_inert() {
        let action = enabled_action();
        let inert = state(InputKind::from(200));
        let _link = inert.link(Some(&action)).expect("link");

        action.trigger(ActionPhase::Performed, ActionValue::Button(true));
        inert.reset_transient();

        assert!(!inert.bool_value());
        assert_eq!(inert.scalar_value(), 0.0);
    }
}

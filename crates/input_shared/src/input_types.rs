// crates/input_shared/src/input_types.rs
//! Compact input types read by game code and recorded for replay.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How a channel reacts to raw notifications and which accessor is valid.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputKind {
    /// Has no meaning. Nothing is subscribed and nothing is reset.
    #[default]
    None = 0,
    /// Whether the button was pressed during this frame. Read as bool.
    Click = 1,
    /// Whether the hold interaction completed during this frame. Read as bool.
    ///
    /// Behaves exactly like `Click`: no duration is tracked here, the
    /// interaction itself lives on the raw action.
    Hold = 2,
    /// Current button level. Read as bool.
    ValueBool = 3,
    /// Current normalized scalar. Read as f32.
    ValueScalar = 4,
    /// Current normalized 2D vector. Read as Vec2.
    Value2D = 5,
    /// Current normalized 3D vector. Read as Vec3.
    Value3D = 6,
}

impl InputKind {
    /// Click and Hold only report the frame they fired in.
    pub fn is_transient(self) -> bool {
        matches!(self, InputKind::Click | InputKind::Hold)
    }
}

impl From<u8> for InputKind {
    /// Out-of-range discriminants decay to `None`.
    fn from(raw: u8) -> Self {
        match raw {
            1 => InputKind::Click,
            2 => InputKind::Hold,
            3 => InputKind::ValueBool,
            4 => InputKind::ValueScalar,
            5 => InputKind::Value2D,
            6 => InputKind::Value3D,
            _ => InputKind::None,
        }
    }
}

/// The six logical channels exposed to game systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    Click,
    Hold,
    Value0,
    Value1,
    Value2,
    Value3,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Click,
        Channel::Hold,
        Channel::Value0,
        Channel::Value1,
        Channel::Value2,
        Channel::Value3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Click => "Click",
            Channel::Hold => "Hold",
            Channel::Value0 => "Value0",
            Channel::Value1 => "Value1",
            Channel::Value2 => "Value2",
            Channel::Value3 => "Value3",
        }
    }

    /// The fixed kind each channel is created with.
    pub fn kind(self) -> InputKind {
        match self {
            Channel::Click => InputKind::Click,
            Channel::Hold => InputKind::Hold,
            Channel::Value0 => InputKind::ValueBool,
            Channel::Value1 => InputKind::ValueScalar,
            Channel::Value2 => InputKind::Value2D,
            Channel::Value3 => InputKind::Value3D,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Notification points of a raw action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    Started,
    Performed,
    Canceled,
}

/// Reading delivered with a raw notification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionValue {
    /// No reading; typed reads return the neutral value.
    #[default]
    None,
    Button(bool),
    Scalar(f32),
    Vector2(Vec2),
    Vector3(Vec3),
}

impl ActionValue {
    /// Buttons read as 0.0 / 1.0. Vectors do not read as scalars.
    pub fn read_scalar(&self) -> Option<f32> {
        match *self {
            ActionValue::None => Some(0.0),
            ActionValue::Button(pressed) => Some(if pressed { 1.0 } else { 0.0 }),
            ActionValue::Scalar(v) => Some(v),
            ActionValue::Vector2(_) | ActionValue::Vector3(_) => None,
        }
    }

    pub fn read_vector2(&self) -> Option<Vec2> {
        match *self {
            ActionValue::None => Some(Vec2::ZERO),
            ActionValue::Vector2(v) => Some(v),
            _ => None,
        }
    }

    pub fn read_vector3(&self) -> Option<Vec3> {
        match *self {
            ActionValue::None => Some(Vec3::ZERO),
            ActionValue::Vector3(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-frame copy of every channel, used for logging and deterministic replay.
/// - `frame`: frame index the snapshot was taken on
/// - `click`/`hold`: transient flags for that frame
/// - `value0..value3`: level, scalar and vector readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub frame: u64,
    pub click: bool,
    pub hold: bool,
    pub value0: bool,
    pub value1: f32,
    pub value2: Vec2,
    pub value3: Vec3,
}

impl InputSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

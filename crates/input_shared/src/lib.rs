// crates/input_shared/src/lib.rs
//! Plain data shared between the binding layer and the game code that reads it.

pub mod input_types;

pub use input_types::{ActionPhase, ActionValue, Channel, InputKind, InputSnapshot};

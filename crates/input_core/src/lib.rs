// crates/input_core/src/lib.rs
//! Input binding layer: caches per-channel state from raw action
//! notifications so game code can query it once per frame.

pub mod action;
pub mod config;
pub mod error;
pub mod hooks;
pub mod source;
pub mod state;
pub mod table;

pub use action::{CallbackContext, InputAction, Subscription};
pub use config::InputConfig;
pub use error::{InputError, Result};
pub use hooks::{FrameHooks, HookToken};
pub use source::{ActionRegistry, ActionSource, MAIN_MAP};
pub use state::{InputState, Reaction};
pub use table::InputBindingTable;

pub use input_shared::{ActionPhase, ActionValue, Channel, InputKind, InputSnapshot};

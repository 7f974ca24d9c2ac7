// crates/input_demo/src/main.rs
mod host_loop;

use std::env;
use std::error::Error;

use crossbeam_channel::Sender;
use glam::{Vec2, Vec3};
use input_core::{
    ActionPhase, ActionRegistry, ActionValue, Channel, FrameHooks, InputBindingTable, InputConfig,
};
use tracing::info;

use host_loop::{HostLoop, RawInputEvent};

const SIM_DT: f32 = 1.0 / 60.0;

/// Scripted device input: frame number, channel, phase, reading.
const SCRIPT: &[(u64, Channel, ActionPhase, ActionValue)] = &[
    (2, Channel::Click, ActionPhase::Performed, ActionValue::Button(true)),
    (3, Channel::Value0, ActionPhase::Performed, ActionValue::Button(true)),
    (3, Channel::Value1, ActionPhase::Started, ActionValue::Scalar(0.5)),
    (4, Channel::Value2, ActionPhase::Performed, ActionValue::Vector2(Vec2::new(0.0, 1.0))),
    (5, Channel::Hold, ActionPhase::Performed, ActionValue::Button(true)),
    (5, Channel::Value3, ActionPhase::Performed, ActionValue::Vector3(Vec3::new(0.0, 0.0, -1.0))),
    (6, Channel::Value0, ActionPhase::Canceled, ActionValue::Button(false)),
    (6, Channel::Value1, ActionPhase::Canceled, ActionValue::Scalar(0.0)),
    (7, Channel::Value2, ActionPhase::Canceled, ActionValue::None),
];

const LAST_FRAME: u64 = 8;

/// Stand-in for a gameplay system: moves a point with Value2 and counts clicks.
#[derive(Default)]
struct Player {
    pos: Vec2,
    clicks: u32,
}

impl Player {
    fn update(&mut self, input: &InputBindingTable, dt: f32) {
        let speed = 400.0;
        let mut velocity = input.value2().vector2_value();
        if velocity.length_squared() > 1.0 {
            velocity = velocity.normalize();
        }
        self.pos += velocity * speed * dt;

        if input.click().bool_value() {
            self.clicks += 1;
        }
    }
}

fn queue_frame(
    tx: &Sender<RawInputEvent>,
    config: &InputConfig,
    frame: u64,
) -> Result<(), Box<dyn Error>> {
    for &(_, channel, phase, value) in SCRIPT.iter().filter(|e| e.0 == frame) {
        tx.send(RawInputEvent {
            action: config.action_path(channel),
            phase,
            value,
        })?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = match env::args().nth(1) {
        Some(path) => InputConfig::load(&path)?,
        None => InputConfig::default(),
    };

    let mut registry = ActionRegistry::default();
    for channel in Channel::ALL {
        registry.register(&config.action_path(channel));
    }
    let host_actions = registry.clone();

    let hooks = FrameHooks::new();
    let table = InputBindingTable::initialize(registry, &hooks, &config);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut host = HostLoop::new(hooks, host_actions, rx);
    let mut player = Player::default();

    for frame in 1..=LAST_FRAME {
        queue_frame(&tx, &config, frame)?;
        let frame = host.run_frame();
        let frame_dt = host.tick_timer();

        player.update(&table, SIM_DT);

        let snapshot = table.snapshot(frame);
        info!(
            frame,
            frame_dt,
            click = snapshot.click,
            hold = snapshot.hold,
            value0 = snapshot.value0,
            value1 = snapshot.value1,
            value2 = ?snapshot.value2,
            value3 = ?snapshot.value3,
            replay_bytes = snapshot.encode()?.len(),
            "frame input"
        );
    }

    host.quit();
    info!(
        pos = ?player.pos,
        clicks = player.clicks,
        active = table.is_active(),
        "session finished"
    );
    Ok(())
}

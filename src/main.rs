//! Headless autopilot run
//!
//! Drives one full session at a fixed 16 ms cadence with a simple keeper
//! autopilot: answer a falling threat once it is halfway down, answer fog
//! before it gets heavy, sleep when the day is done. Logs every notification
//! and prints a JSON run summary, so the engine can be watched without a
//! renderer attached.

use lighthouse_vigil::{ActiveThreat, ControlId, FieldLayout, GameSession, SessionState};
use serde::Serialize;

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    final_day: u32,
    success_count: u32,
    ticks: u64,
    won: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let mut session = GameSession::new(1, seed, FieldLayout::default());
    log::info!("autopilot run starting with seed {seed}");

    let mut now: u64 = 0;
    let mut ticks: u64 = 0;
    // ~10 minutes of frames, far more than a full run needs
    while !session.is_ended() && ticks < 40_000 {
        now += 16;
        ticks += 1;

        match session.active_threat() {
            Some(ActiveThreat::Falling(falling)) if falling.progress() > 0.5 => {
                session.queue_control(falling.kind.matching_control());
            }
            Some(ActiveThreat::Fog(fog)) if !fog.fade_out && fog.darkness > 0.4 => {
                session.queue_control(ControlId::Light);
            }
            _ => {}
        }
        if session.state() == SessionState::WaitingToAdvance {
            session.queue_control(ControlId::Sleep);
        }

        session.tick(now);
        for event in session.take_events() {
            log::info!("event: {event:?}");
        }
    }

    let summary = RunSummary {
        seed,
        final_day: session.day(),
        success_count: session.success_count(),
        ticks,
        won: matches!(session.state(), SessionState::Ended { won: true }),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}

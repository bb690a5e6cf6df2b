//! Headless demo driver
//!
//! Runs the simulation at its fixed timestep from wall-clock frame deltas,
//! with an autopilot paddle standing in for player input. A real embedder
//! would replace the autopilot with captured key/pointer state and hand
//! each frame's draw list to a renderer.

use std::thread;
use std::time::{Duration, Instant};

use brickout::scene;
use brickout::sim::level::builtin_levels;
use brickout::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use brickout::FrameScheduler;

/// Simple ball-chasing input: launch whenever a launch is awaited, track
/// the ball's horizontal position with the pointer-target input.
fn autopilot(state: &GameState) -> TickInput {
    let wants_launch = match state.phase {
        GamePhase::Splash | GamePhase::Ready | GamePhase::GameOver => true,
        GamePhase::Playing => !state.ball.launched,
        GamePhase::LevelCleared => false,
    };
    let target = matches!(state.phase, GamePhase::Playing)
        .then(|| state.ball.body.rect().center().x);
    TickInput {
        left: false,
        right: false,
        launch: wants_launch,
        paddle_target: target,
    }
}

fn main() {
    env_logger::init();

    let mut state = GameState::new(builtin_levels()).expect("built-in levels are valid");
    let mut scheduler = FrameScheduler::new();

    let started = Instant::now();
    let mut last = started;

    loop {
        let now = Instant::now();
        let elapsed = (now - last).as_secs_f32();
        last = now;

        let input = autopilot(&state);
        scheduler.advance(elapsed, |dt| tick(&mut state, &input, dt));

        let mut finished = false;
        for event in state.take_events() {
            log::info!("{event:?}");
            if matches!(event, GameEvent::GameWon | GameEvent::GameOver) {
                finished = true;
            }
        }

        // A renderer would consume this; here it just keeps the
        // dirty-rect bookkeeping honest.
        let _frame = scene::collect(&mut state);

        if finished {
            log::info!("run finished after {:.1}s", started.elapsed().as_secs_f32());
            break;
        }
        if started.elapsed() > Duration::from_secs(300) {
            log::warn!("demo timeout, stopping");
            break;
        }

        thread::sleep(Duration::from_millis(7));
    }
}

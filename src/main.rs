//! Dino Runner entry point
//!
//! Headless runner: plays a few rounds with the autopilot at the configured
//! refresh rate and reports the scores. Optional first argument is a JSON
//! settings file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use dino_runner::autopilot;
    use dino_runner::clock::{ClockHandle, RealtimeFrames, Scheduler};
    use dino_runner::{Session, Settings};

    env_logger::init();
    log::info!("Dino Runner (headless) starting...");

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let clock = ClockHandle::new();
    let mut session = Session::from_settings(&settings, clock.clone());
    let mut scheduler = Scheduler::new(RealtimeFrames::new(settings.refresh_hz), clock);

    for round in 1..=settings.rounds {
        session.start();
        let frames = scheduler.run(|frame| {
            if autopilot::should_jump(session.world(), session.tuning()) {
                session.request_jump();
            }
            session.on_frame(frame);
        });

        let snapshot = session.snapshot();
        println!(
            "round {}: score {} ({} frames, {} obstacles on screen) best {}",
            round,
            snapshot.score,
            frames,
            snapshot.obstacles.len(),
            snapshot.best_score
        );
    }

    log::info!(
        "Done: best score {} (seed {})",
        session.best_score(),
        session.seed()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native-only
}

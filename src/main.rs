//! Valentine Prompt entry point
//!
//! The browser build is driven through `valentine_prompt::web`. Natively this
//! plays a scripted session on a simulated clock and prints each snapshot.
//!
//! Usage: `valentine-prompt [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use valentine_prompt::sim::{InputEvent, InteractionMachine, Measurement, Size, Snapshot};
    use valentine_prompt::Settings;

    env_logger::init();
    log::info!("Valentine Prompt (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Bad seed ({}), using 14", e);
            14
        }
        None => 14,
    };
    let settings_path = args.next().map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings:\n{}", json),
        Err(e) => log::warn!("Failed to serialize settings: {}", e),
    }
    let control = settings.decline_control;

    let mut machine = InteractionMachine::new(seed, settings);
    machine.subscribe(Box::new(|snap: &Snapshot| {
        println!(
            "[rev {:>2}] {:?} declines={} scale={:.1} pos={:?} particles={} asset={}",
            snap.revision,
            snap.phase,
            snap.decline_count,
            snap.accept_scale,
            snap.control_position.map(|p| (p.x.round(), p.y.round())),
            snap.particles.len(),
            snap.asset,
        );
        println!("          {} | {}", snap.headline, snap.status_line);
    }));

    let area = Measurement::new(Size::new(512.0, 256.0), control);
    let script = [
        (0.0, InputEvent::Decline { measurement: Some(area) }),
        (800.0, InputEvent::Decline { measurement: Some(area) }),
        (850.0, InputEvent::Decline { measurement: Some(area) }),
        // area not mounted yet: counts, doesn't move
        (1500.0, InputEvent::Decline { measurement: None }),
        (2600.0, InputEvent::Accept),
        (3000.0, InputEvent::Reset),
    ];

    for (now_ms, event) in script {
        // Fire any sweeps that came due before this event
        while let Some(at) = machine.next_sweep_at().filter(|&at| at <= now_ms) {
            machine.dispatch(InputEvent::Sweep, at);
        }
        machine.dispatch(event, now_ms);
    }

    // Let the remaining particles expire
    while let Some(at) = machine.next_sweep_at() {
        machine.dispatch(InputEvent::Sweep, at);
    }

    match machine.snapshot().to_json() {
        Ok(json) => println!("\nFinal snapshot:\n{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

//! Breath Swarm entry point
//!
//! On the web, the library's `SwarmHandle` is driven from the page. Natively,
//! this runs a headless session: two breath cycles at 60 fps with people
//! joining and leaving, logging membership changes and phase transitions.
//!
//! Usage: `breath-swarm [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breath Swarm (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load {path}: {err}");
                std::process::exit(1);
            }
        },
        None => breath_swarm::SwarmConfig::default(),
    };

    match headless::run(config, breath_swarm::platform::now_epoch_seconds()) {
        Ok(summary) => println!("{summary}"),
        Err(err) => {
            log::error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<breath_swarm::SwarmConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(breath_swarm::SwarmConfig::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use breath_swarm::{ConfigError, Participant, Swarm, SwarmConfig, SwarmEvent};

    const FPS: f64 = 60.0;
    const CYCLES: f64 = 2.0;

    /// (id, mood tag, joins at, leaves at) as fractions of the session
    const ROSTER: &[(&str, &str, f64, f64)] = &[
        ("me", "calm", 0.0, 1.0),
        ("ana", "grateful", 0.0, 0.6),
        ("ben", "anxious", 0.05, 1.0),
        ("chidi", "hopeful", 0.1, 0.45),
        ("dara", "tired", 0.2, 1.0),
        ("eun", "joyful", 0.3, 0.9),
        ("femi", "", 0.35, 1.0),
        ("gus", "peaceful", 0.5, 0.8),
        ("hana", "stressed", 0.55, 1.0),
        ("ivo", "calm", 0.7, 1.0),
    ];

    pub fn run(config: SwarmConfig, start: f64) -> Result<String, ConfigError> {
        let mut swarm = Swarm::new(config)?.with_local_user("me");
        let session = swarm.clock().total_cycle_seconds() * CYCLES;
        let dt = 1.0 / FPS;
        let frames = (session * FPS).ceil() as usize;

        let mut transitions = 0;
        let mut admitted = 0;
        let mut evicted = 0;
        let mut peak = 0;
        for i in 0..=frames {
            let elapsed = i as f64 * dt;
            let progress = elapsed / session;
            let participants: Vec<Participant> = ROSTER
                .iter()
                .filter(|(_, _, join, leave)| progress >= *join && progress < *leave)
                .map(|(id, tag, _, _)| Participant::new(*id, *tag))
                .collect();

            let frame = swarm.frame(&participants, start + elapsed, dt as f32);
            for event in &frame.events {
                match event {
                    SwarmEvent::Admitted { id, mood, .. } => {
                        admitted += 1;
                        log::info!("{elapsed:6.2}s  + {id} ({})", mood.as_str());
                    }
                    SwarmEvent::Evicted { id } => {
                        evicted += 1;
                        log::info!("{elapsed:6.2}s  - {id}");
                    }
                    SwarmEvent::Retagged { id, mood, .. } => {
                        log::info!("{elapsed:6.2}s  ~ {id} is now {}", mood.as_str());
                    }
                }
            }
            if frame.phase_changed {
                transitions += 1;
                log::info!(
                    "{elapsed:6.2}s  {} ({:.1}s)",
                    frame.breath.label(),
                    frame.breath.phase_remaining_seconds
                );
            }
            peak = peak.max(frame.particles.len());

            if i % (FPS as usize) == 0
                && let Some(me) = frame.particles.iter().find(|p| p.is_local_user)
            {
                log::debug!(
                    "{elapsed:6.2}s  me at r={:.2} θ={:.2} scale={:.3}",
                    me.radius,
                    me.angle,
                    me.scale
                );
            }
        }

        Ok(format!(
            "{frames} frames over {session:.1}s: {transitions} phase transitions, \
             {admitted} joins, {evicted} leaves, peak swarm {peak}"
        ))
    }

}

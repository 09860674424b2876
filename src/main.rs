//! Headless runner: animates a swarm with a fixed timestep and logs how it
//! gathers and releases.
//!
//! Usage: `swarm-morph [config.json] [seed]`
//!
//! Set `RUST_LOG=debug` to see target toggles.

use rand::SeedableRng;
use std::error::Error;
use swarm_morph::morph::DEFAULT_SETTLE_EPSILON;
use swarm_morph::prelude::*;

const FRAME_RATE: f32 = 60.0;
const PHASE_SECONDS: f32 = 6.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => {
            log::info!("Loading config from {path}");
            MorphConfig::load(&path)?
        }
        None => MorphConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 0,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut scene = MorphScene::new(&config, &mut rng)?;
    let mut clock = FrameClock::new();
    clock.set_fixed_delta(Some(1.0 / FRAME_RATE));
    let mut buffer = InstanceBuffer::with_capacity(config.count as usize);

    let frames_per_phase = (PHASE_SECONDS * FRAME_RATE) as u32;
    let mut target = MorphTarget::Formed;

    for phase in 0..2 {
        log::info!("{} -> {}", target.toggled().label(), target.label());
        for frame in 0..frames_per_phase {
            let (elapsed, delta) = clock.advance(0.0);
            scene.frame(target, delta, elapsed);
            scene.write_to(&mut buffer);
            buffer.mark_uploaded();

            if frame % FRAME_RATE as u32 == 0 {
                let (min, max) = extents(scene.transforms());
                log::info!(
                    "t={elapsed:5.2}s progress={:.4} extents=({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2})",
                    scene.progress(),
                    min.x,
                    min.y,
                    min.z,
                    max.x,
                    max.y,
                    max.z
                );
            }
        }
        log::info!(
            "Phase {} done: progress={:.5} settled={} ({} bytes of instance data)",
            phase + 1,
            scene.progress(),
            scene.morph().is_settled(DEFAULT_SETTLE_EPSILON),
            buffer.as_bytes().len()
        );
        target = target.toggled();
    }

    Ok(())
}

fn extents(transforms: &[ParticleTransform]) -> (Vec3, Vec3) {
    transforms.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), t| (min.min(t.position), max.max(t.position)),
    )
}

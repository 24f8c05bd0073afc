mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use instant::Instant;
use show_core::{Formation, ShowEngine};

use crate::cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    args.validate()?;

    let plan = args
        .formations
        .iter()
        .map(|name| {
            name.parse::<Formation>()
                .with_context(|| format!("cannot fly '{name}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut engine = ShowEngine::new(args.engine_config()).context("building the engine")?;
    log::info!(
        "[sim] {} drones, {} formation(s) at {} fps, easing {:?}",
        engine.len(),
        plan.len(),
        args.fps,
        engine.easing()
    );

    let frame_ms = 1000.0 / args.fps;
    let mut now_ms = 0.0_f64;
    for formation in plan {
        now_ms = fly(&mut engine, formation, now_ms, frame_ms, args.max_seconds);
    }
    log::info!("[sim] show finished after {:.1}s simulated", now_ms / 1000.0);
    Ok(())
}

/// Request `formation` at `start_ms` and tick until the fleet settles or the
/// time limit runs out. Returns the clock after the last tick.
fn fly(
    engine: &mut ShowEngine,
    formation: Formation,
    start_ms: f64,
    frame_ms: f64,
    max_seconds: f64,
) -> f64 {
    engine.request_formation(formation, start_ms);
    for cue in engine.take_cues() {
        log::info!("[audio] cue {cue}");
    }

    let limit_ms = start_ms + max_seconds * 1000.0;
    let mut now_ms = start_ms;
    let mut frames = 0u64;
    let mut busy = std::time::Duration::ZERO;
    loop {
        let started = Instant::now();
        engine.tick(now_ms);
        busy += started.elapsed();
        frames += 1;
        if engine.is_settled() || now_ms >= limit_ms {
            break;
        }
        now_ms += frame_ms;
    }

    let elapsed_s = (now_ms - start_ms) / 1000.0;
    if engine.is_settled() {
        log::info!("[sim] {formation}: settled after {frames} frames ({elapsed_s:.2}s)");
    } else {
        let stats = engine.stats(now_ms);
        log::warn!(
            "[sim] {formation}: {} of {} still flying after {elapsed_s:.2}s",
            stats.flying + stats.waiting,
            stats.total
        );
    }

    let (lo, hi) = bounds(engine.positions());
    log::info!("[sim] {formation}: bounds {lo:.1} .. {hi:.1}");
    log::debug!("[sim] {formation}: {:?}", engine.stats(now_ms));
    log::info!(
        "[sim] {formation}: mean tick {:.3} ms",
        busy.as_secs_f64() * 1000.0 / frames as f64
    );
    now_ms + frame_ms
}

fn bounds(points: &[Vec3]) -> (Vec3, Vec3) {
    points.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    )
}

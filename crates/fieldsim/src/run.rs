use std::fs;
use std::path::Path;

use animator::{Animator, DrawCommand, EntityCounts, HeadlessHost, Phase, Viewport};
use anyhow::{Context, Result};
use fieldconfig::FieldConfig;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Bundled presets, overlaid by the scenes of `path` when given.
pub fn load_config(path: Option<&Path>) -> Result<FieldConfig> {
    let builtin = FieldConfig::builtin().context("bundled presets failed to load")?;
    let Some(path) = path else {
        return Ok(builtin);
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = FieldConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    config.merge_missing(&builtin);
    tracing::debug!(
        path = %path.display(),
        scenes = config.scenes.len(),
        "loaded field config"
    );
    Ok(config)
}

#[derive(Debug, Serialize)]
struct RunReport {
    scene: String,
    seed: Option<u64>,
    phase: Phase,
    viewport: Viewport,
    frames_requested: u32,
    frames_drawn: u32,
    entities: Option<EntityCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<Vec<DrawCommand>>,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let scene = args
        .scene
        .clone()
        .or_else(|| config.default_scene().map(str::to_owned))
        .unwrap_or_default();

    let mut animator = Animator::from_config(
        HeadlessHost::new(args.size),
        &config,
        args.scene.as_deref(),
        args.seed,
    )?;
    tracing::info!(%scene, size = %args.size, frames = args.frames, "running field headless");

    animator.mount();

    let mut resizes = args.resize_at.clone();
    resizes.sort_by_key(|resize| resize.frame);
    let mut resizes = resizes.into_iter().peekable();

    let mut drawn = 0;
    for index in 0..args.frames {
        while let Some(resize) = resizes.next_if(|resize| resize.frame <= index) {
            tracing::debug!(frame = index, viewport = %resize.viewport, "viewport resized");
            animator.host_mut().set_viewport(resize.viewport);
            animator.resize(resize.viewport);
        }
        if animator.fire_frame(f64::from(index) * args.frame_ms) {
            drawn += 1;
        }
    }

    let report = RunReport {
        scene,
        seed: args.seed.or(config.seed),
        phase: animator.phase(),
        viewport: animator.viewport(),
        frames_requested: args.frames,
        frames_drawn: drawn,
        entities: animator.field().map(|field| field.counts()),
        commands: args
            .json
            .then(|| {
                animator
                    .surface()
                    .map(|surface| surface.commands().to_vec())
            })
            .flatten(),
    };
    animator.teardown();

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("scene     {}", report.scene);
    println!("viewport  {}", report.viewport);
    println!(
        "frames    {} drawn / {} requested",
        report.frames_drawn, report.frames_requested
    );
    println!("phase     {:?}", report.phase);
    match report.seed {
        Some(seed) => println!("seed      {seed}"),
        None => println!("seed      (random)"),
    }
    let Some(counts) = &report.entities else {
        println!("entities  none");
        return;
    };
    println!("entities  {}", counts.total());
    let rows = [
        ("waves", counts.waves),
        ("particles", counts.particles),
        ("nodes", counts.nodes),
        ("links", counts.links),
        ("rings", counts.rings),
        ("sparks", counts.sparks),
        ("signals", counts.signals),
        ("lines", counts.lines),
        ("beacons", counts.beacons),
        ("shapes", counts.shapes),
    ];
    for (name, count) in rows.into_iter().filter(|(_, count)| *count > 0) {
        println!("  {name:<10} {count}");
    }
}

pub fn list_presets() -> Result<()> {
    let config = FieldConfig::builtin().context("bundled presets failed to load")?;
    let default = config.default_scene();
    println!("Bundled scenes:");
    for name in config.scene_names() {
        let Some(scene) = config.scene(name) else {
            continue;
        };
        let marker = if Some(name) == default { "*" } else { " " };
        println!(
            "{marker} {name:<10} entities={:<4} palette={}",
            scene.initial_entity_count(),
            scene
                .palette
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        );
    }
    Ok(())
}

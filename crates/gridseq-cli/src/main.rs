//! gridseq-cli: replay an input script against the step sequencer core

mod render;
mod script;

use std::path::{Path, PathBuf};

use anyhow::Context;
use gridseq_core::{SequencerConfig, StepSequencer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use render::TransportView;
use script::Command;

/// Clip length used until a script loads its own
const DEFAULT_CLIP_BEATS: f64 = 16.0;

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gridseq")
        .join("config.toml")
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<SequencerConfig> {
    if let Some(path) = explicit {
        return SequencerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let path = config_path();
    if !path.exists() {
        return Ok(SequencerConfig::default());
    }
    tracing::info!("Using config {}", path.display());
    SequencerConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
}

fn run(seq: &mut StepSequencer, commands: Vec<Command>) {
    let mut transport = TransportView::default();

    for command in commands {
        match command {
            Command::Clip(beats) => seq.load_clip(beats),
            Command::Set { step, row, velocity, duration } => {
                seq.grid_mut().set_step(step, row, velocity, duration)
            }
            Command::Toggle { column, row } => seq.on_grid_press(column, row, None),
            Command::Clear { step, row } => seq.grid_mut().clear_step(step, row),
            Command::ClearRow(row) => seq.grid_mut().clear_row(row),
            Command::Select { column, row } => seq.select_note(column, row),
            Command::Knob { index, control, fast } => seq.on_knob_value(index, control, fast),
            Command::Scene(scene) => {
                if let Some(name) = seq.on_scene(scene) {
                    println!("resolution: {}", name);
                }
            }
            Command::Left => seq.on_left(),
            Command::Right => seq.on_right(),
            Command::Play(step) => transport.play_step = step,
            Command::Loop { start, end } => {
                transport.loop_start_page = start;
                transport.loop_end_page = Some(end);
            }
            Command::Show => print!("{}", render::render(seq, &transport)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("gridseq_core=debug".parse()?)
            .add_directive("gridseq_cli=debug".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let mut config_arg = None;
    let mut script_arg = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_arg = Some(PathBuf::from(args.next().context("--config needs a path")?)),
            _ => script_arg = Some(PathBuf::from(arg)),
        }
    }
    let script_path = script_arg.context("usage: gridseq-cli [--config <file>] <script>")?;

    let config = load_config(config_arg.as_deref())?;
    let source = std::fs::read_to_string(&script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let commands = script::parse(&source)?;

    let mut seq = StepSequencer::new(config, DEFAULT_CLIP_BEATS)?;
    tracing::info!("Replaying {} commands", commands.len());
    run(&mut seq, commands);
    Ok(())
}

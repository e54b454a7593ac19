use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use raylib::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use image_stack::config::{self, Configuration, OverlayConfig};
use image_stack::engine::Engine;
use image_stack::stack::StackEngine;
use image_stack::texture_loader::load_sorted_image_paths;

/// Click through a stack of images with a cross-fade
#[derive(Debug, Parser)]
#[command(name = "image-stack", about = "Click through a 3D stack of images")]
struct Cli {
    /// Directory whose images (sorted by name) replace the configured stack
    #[arg(value_name = "IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the cross-fade duration (ms)
    #[arg(long, value_name = "MILLIS")]
    fade_ms: Option<u64>,

    /// Override the depth between stack layers
    #[arg(long, value_name = "SPACING")]
    layer_spacing: Option<f32>,

    /// Image drawn on top of the whole stack
    #[arg(long, value_name = "FILE")]
    overlay: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("image_stack={}", level).parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn load_configuration(cli: &Cli) -> Result<Configuration> {
    let mut cfg = match &cli.config {
        Some(path) => config::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };

    if let Some(dir) = &cli.image_dir {
        cfg.images = load_sorted_image_paths(dir)
            .with_context(|| format!("listing images in {}", dir.display()))?;
    }
    if let Some(ms) = cli.fade_ms {
        cfg.fade_duration = Duration::from_millis(ms);
    }
    if let Some(spacing) = cli.layer_spacing {
        cfg.layer_spacing = spacing;
    }
    if let Some(path) = &cli.overlay {
        cfg.overlay = Some(OverlayConfig::new(path.clone()));
    }

    cfg.validate().context("validating configuration")?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = load_configuration(&cli)?;
    info!(
        images = cfg.images.len(),
        fade = ?cfg.fade_duration,
        layer_spacing = cfg.layer_spacing,
        "configuration loaded"
    );

    let (mut rl, thread) = raylib::init()
        .size(cfg.window.width, cfg.window.height)
        .title(&cfg.window.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cfg.window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_mouse_cursor(MouseCursor::MOUSE_CURSOR_POINTING_HAND);

    let paths = cfg.images.clone();
    let mut engine = StackEngine::new(cfg);
    engine
        .initialize(&mut rl, &thread, paths)
        .context("loading image stack")?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        engine.handle_input(&rl);
        engine.render_frame(Instant::now(), &mut rl, &thread);
    }
    Ok(())
}

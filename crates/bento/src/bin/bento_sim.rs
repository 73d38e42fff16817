//! # BENTO Headless Simulator
//!
//! Replays a scripted visit (splash, home grid, about page) against the
//! effects core on a virtual clock and logs what a host would render.
//!
//! Run with: `RUST_LOG=bento=debug,bento_ui=debug cargo run --bin bento_sim`

use std::process::ExitCode;

use bento::ui::layout::Point;
use bento::ui::render::StyleCommand;
use bento::ui::CarouselEvent;
use bento::{AboutPage, EffectsConfig, HomeGrid, LoadingSplash, Millis, SplashEvent, Viewport};
use tracing_subscriber::EnvFilter;

/// One 60 Hz frame.
const FRAME_MS: Millis = 16;

struct Options {
    config: Option<String>,
    width: f32,
    height: f32,
}

/// Parses a pixel size, keeping `current` when the value is not a number.
fn parse_px(flag: &str, value: &str, current: f32) -> f32 {
    match value.parse::<f32>() {
        Ok(px) if px.is_finite() && px > 0.0 => px,
        _ => {
            tracing::warn!(flag, value, fallback = current, "ignoring invalid size");
            current
        }
    }
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut options = Options {
        config: None,
        width: 1280.0,
        height: 800.0,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-w" | "--width" => {
                if i + 1 < args.len() {
                    options.width = parse_px("--width", &args[i + 1], options.width);
                    i += 1;
                }
            }
            "--height" => {
                if i + 1 < args.len() {
                    options.height = parse_px("--height", &args[i + 1], options.height);
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Usage: bento_sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>    Effects config (TOML)");
                println!("  -w, --width <PX>       Viewport width (default: 1280)");
                println!("      --height <PX>      Viewport height (default: 800)");
                println!("  -h, --help             Show this help");
                return None;
            }
            other => {
                tracing::warn!(argument = other, "ignoring unknown argument");
            }
        }
        i += 1;
    }
    Some(options)
}

fn run_splash(config: &EffectsConfig) -> Millis {
    let mut splash = LoadingSplash::new(config, 0);
    let mut now = 0;
    while !splash.has_navigated() {
        let Some(wakeup) = splash.next_wakeup() else {
            break;
        };
        now = wakeup;
        splash.advance(now);
        for event in splash.drain_events() {
            match event {
                SplashEvent::Typing(_) => {}
                SplashEvent::TypingCompleted => {
                    tracing::info!(now, text = splash_text(config), "splash typing complete");
                }
                SplashEvent::Navigate(target) => {
                    tracing::info!(now, %target, "splash navigates");
                }
            }
        }
    }
    now
}

fn splash_text(config: &EffectsConfig) -> &str {
    config
        .splash
        .sentences
        .last()
        .map_or("", String::as_str)
}

fn run_frames(home: &mut HomeGrid, from: Millis, duration: Millis) -> Millis {
    let mut now = from;
    let (mut spawned, mut updated, mut removed) = (0usize, 0usize, 0usize);
    while now < from + duration {
        now += FRAME_MS;
        home.frame(now);
        for command in home.drain_commands() {
            match command {
                StyleCommand::SpawnParticle { .. } => spawned += 1,
                StyleCommand::UpdateParticle { .. } => updated += 1,
                StyleCommand::RemoveParticle { .. } => removed += 1,
                StyleCommand::SetProperty { .. } => {}
            }
        }
    }
    tracing::info!(now, spawned, updated, removed, "frames rendered");
    now
}

fn run_home(config: &EffectsConfig, options: &Options, start: Millis) -> Millis {
    let viewport = Viewport::new(options.width, options.height, &config.viewport);
    let mut home = HomeGrid::mount(config, viewport, Point::ZERO, start);

    let Some(projects) = home.card_id("projects") else {
        return start;
    };
    if let Some(mounted) = home.registry().get(projects) {
        let center = mounted.bounds.center();
        home.pointer_move(center.x, center.y);
        let lit = home.drain_commands().count();
        tracing::info!(x = center.x, y = center.y, properties = lit, "pointer over projects");
    }

    home.card_enter(projects, start);
    let mut now = run_frames(&mut home, start, 1_000);
    tracing::info!(
        visible = home.particles().visible_count(projects),
        "particles orbiting"
    );

    home.card_leave(projects, now);
    now = run_frames(&mut home, now, config.particles.fade_ms + 100);
    home.pointer_exit();

    for slug in ["hero", "contact", "resume", "blog"] {
        match home.click(slug) {
            Ok(intent) => {
                tracing::info!(slug, ?intent, contact = home.is_contact_open(), "click");
            }
            Err(err) => tracing::warn!(slug, %err, "click rejected"),
        }
    }
    home.close_contact();

    home.unmount(now);
    home.drain_commands().for_each(drop);
    now
}

fn run_about(config: &EffectsConfig, start: Millis) -> Result<Millis, bento::BentoError> {
    let mut about = AboutPage::mount(config.carousel.clone(), start)?;
    let mut now = start + config.carousel.interval_ms * 2 + config.carousel.slide_ms * 2;
    about.advance(now);
    about.next(now);
    now += config.carousel.slide_ms * 2;
    about.advance(now);
    about.select(0, now)?;
    now += config.carousel.resume_delay_ms + config.carousel.slide_ms;
    about.advance(now);

    for event in about.drain_events() {
        if let CarouselEvent::IndexChanged { index, direction } = event {
            tracing::info!(index, ?direction, "certification shown");
        }
    }
    tracing::info!(current = %about.current().title, "leaving about page");
    about.unmount();
    Ok(now)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(options) = parse_args(&args) else {
        return ExitCode::SUCCESS;
    };

    let config = match &options.config {
        Some(path) => match EffectsConfig::from_path(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%path, %err, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => EffectsConfig::default(),
    };

    let now = run_splash(&config);
    let now = run_home(&config, &options, now);
    match run_about(&config, now) {
        Ok(now) => {
            tracing::info!(now, "visit complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "about page failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bento_sim")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_sizes_and_config_are_read() {
        let options = parse_args(&args(&["-w", "375", "--height", "812", "-c", "a.toml"])).unwrap();
        assert!((options.width - 375.0).abs() < f32::EPSILON);
        assert!((options.height - 812.0).abs() < f32::EPSILON);
        assert_eq!(options.config.as_deref(), Some("a.toml"));
    }

    #[test]
    fn test_invalid_sizes_keep_defaults() {
        let options = parse_args(&args(&["--width", "wide", "--height", "-5"])).unwrap();
        assert!((options.width - 1280.0).abs() < f32::EPSILON);
        assert!((options.height - 800.0).abs() < f32::EPSILON);
        assert!((parse_px("--width", "NaN", 640.0) - 640.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_help_stops_the_run() {
        assert!(parse_args(&args(&["--help"])).is_none());
    }
}

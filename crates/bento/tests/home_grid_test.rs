//! Integration tests for the home grid: glow, hover particles, card clicks.

use bento::ui::config::ParticleConfig;
use bento::ui::layout::Point;
use bento::ui::render::StyleCommand;
use bento::ui::widget::{CardId, CardIntent};
use bento::{BentoError, EffectsConfig, HomeGrid, Viewport};

fn config_with_particles(count: usize) -> EffectsConfig {
    EffectsConfig {
        particles: ParticleConfig {
            count,
            ..ParticleConfig::default()
        },
        ..EffectsConfig::default()
    }
}

fn desktop_home(config: &EffectsConfig) -> (HomeGrid, CardId) {
    let viewport = Viewport::new(1280.0, 800.0, &config.viewport);
    let home = HomeGrid::mount(config, viewport, Point::ZERO, 0);
    let projects = home.card_id("projects").unwrap();
    (home, projects)
}

fn spawn_count(home: &mut HomeGrid) -> usize {
    home.drain_commands()
        .filter(|command| matches!(command, StyleCommand::SpawnParticle { .. }))
        .count()
}

#[test]
fn test_glow_at_card_center() {
    let config = EffectsConfig::default();
    let (mut home, projects) = desktop_home(&config);

    let center = home.registry().get(projects).unwrap().bounds.center();
    assert!(home.pointer_move(center.x, center.y));

    let sample = home.glow().sample(projects).unwrap();
    assert!((sample.intensity - 1.0).abs() < f32::EPSILON);
    assert!((sample.relative.x - 50.0).abs() < 1e-3);
    assert!((sample.relative.y - 50.0).abs() < 1e-3);

    // Every card got its four properties.
    let cards = home.registry().len();
    assert_eq!(home.drain_commands().count(), cards * 4);
}

#[test]
fn test_glow_goes_dark_when_pointer_leaves() {
    let config = EffectsConfig::default();
    let (mut home, projects) = desktop_home(&config);

    home.pointer_move(10.0, 10.0);
    home.drain_commands().for_each(drop);

    assert!(home.pointer_exit());
    assert_eq!(home.glow().sample(projects).unwrap().intensity, 0.0);
    let cards = home.registry().len();
    assert_eq!(home.drain_commands().count(), cards);

    // Outside the grid behaves the same way.
    let below = home.grid_bounds().bottom() + 50.0;
    home.pointer_move(10.0, below);
    assert_eq!(home.glow().sample(projects).unwrap().intensity, 0.0);
}

#[test]
fn test_hover_spawns_staggered_particles() {
    let config = config_with_particles(3);
    let (mut home, projects) = desktop_home(&config);
    home.drain_commands().for_each(drop);

    assert!(home.card_enter(projects, 0));
    assert_eq!(spawn_count(&mut home), 1);

    home.advance(49);
    assert_eq!(spawn_count(&mut home), 0);
    home.advance(50);
    assert_eq!(spawn_count(&mut home), 1);
    home.advance(99);
    assert_eq!(spawn_count(&mut home), 0);
    home.advance(100);
    assert_eq!(spawn_count(&mut home), 1);

    home.frame(160);
    assert_eq!(home.particles().visible_count(projects), 3);

    let mut spawned: Vec<_> = home
        .particles()
        .particles(projects)
        .map(|(_, particle)| particle.spawned_at)
        .collect();
    spawned.sort_unstable();
    assert_eq!(spawned, vec![0, 50, 100]);
}

#[test]
fn test_new_hover_session_retires_the_previous_one() {
    let config = config_with_particles(3);
    let (mut home, projects) = desktop_home(&config);

    home.card_enter(projects, 0);
    let mut now = 0;
    while now < 400 {
        now += 16;
        home.frame(now);
    }
    let first: Vec<_> = home
        .particles()
        .particles(projects)
        .map(|(handle, _)| handle)
        .collect();
    assert_eq!(first.len(), 3);

    home.card_enter(projects, now);
    let settled = now + config.particles.fade_ms + 16;
    while now < settled {
        now += 16;
        home.frame(now);
    }

    let remaining: Vec<_> = home
        .particles()
        .particles(projects)
        .map(|(handle, _)| handle)
        .collect();
    assert!(remaining.iter().all(|handle| !first.contains(handle)));
    assert_eq!(remaining.len(), 3);
    assert_eq!(home.particles().visible_count(projects), 3);
}

#[test]
fn test_hover_end_cancels_everything() {
    let config = config_with_particles(5);
    let (mut home, projects) = desktop_home(&config);

    home.card_enter(projects, 0);
    let mut now = 0;
    while now < 120 {
        now += 16;
        home.frame(now);
    }
    assert!(home.card_leave(projects, now));
    assert!(!home.particles().is_hovered(projects));

    let gone = now + config.particles.fade_ms;
    while now < gone {
        now += 16;
        home.frame(now);
    }
    assert_eq!(home.particles().live_count(projects), 0);
    assert_eq!(home.particles().pending_tasks(), 0);

    home.drain_commands().for_each(drop);
    while now < 10_000 {
        now += 16;
        home.frame(now);
    }
    assert_eq!(home.drain_commands().count(), 0);
}

#[test]
fn test_mobile_viewport_suppresses_particles() {
    let config = config_with_particles(3);
    let viewport = Viewport::new(375.0, 812.0, &config.viewport);
    let mut home = HomeGrid::mount(&config, viewport, Point::ZERO, 0);
    let projects = home.card_id("projects").unwrap();

    assert!(!home.particles().is_enabled());
    assert!(!home.card_enter(projects, 0));
    home.frame(500);
    assert_eq!(home.particles().live_count(projects), 0);

    // Glow still works on mobile.
    let center = home.registry().get(projects).unwrap().bounds.center();
    home.pointer_move(center.x, center.y);
    assert!(home.glow().sample(projects).unwrap().intensity > 0.99);
}

#[test]
fn test_particles_follow_viewport_class() {
    let config = config_with_particles(3);
    let (mut home, projects) = desktop_home(&config);

    home.card_enter(projects, 0);
    home.frame(200);
    assert_eq!(home.particles().visible_count(projects), 3);

    home.resize(600.0, 800.0, 200);
    assert!(home.viewport().is_mobile());
    assert!(!home.particles().is_enabled());
    assert_eq!(home.particles().visible_count(projects), 0);

    home.resize(1280.0, 800.0, 1_000);
    assert!(home.particles().is_enabled());
    assert!(home.card_enter(projects, 1_000));
}

#[test]
fn test_mobile_particles_kept_when_allowed() {
    let mut config = config_with_particles(2);
    config.particles.disable_on_mobile = false;
    let viewport = Viewport::new(375.0, 812.0, &config.viewport);
    let mut home = HomeGrid::mount(&config, viewport, Point::ZERO, 0);
    let projects = home.card_id("projects").unwrap();

    assert!(home.card_enter(projects, 0));
    home.frame(100);
    assert_eq!(home.particles().visible_count(projects), 2);
}

#[test]
fn test_click_dispatch() {
    let config = EffectsConfig::default();
    let (mut home, projects) = desktop_home(&config);

    assert_eq!(home.click("hero"), Ok(None));
    assert_eq!(
        home.click("about"),
        Ok(Some(CardIntent::Navigate("/about-me".into())))
    );
    assert!(matches!(
        home.click("resume"),
        Ok(Some(CardIntent::Download { ref file_name, .. })) if file_name == "resume.pdf"
    ));

    assert!(!home.is_contact_open());
    assert_eq!(home.click("contact"), Ok(Some(CardIntent::OpenContact)));
    assert!(home.is_contact_open());
    assert!(home.close_contact());
    assert!(!home.close_contact());

    assert_eq!(
        home.click("blog"),
        Err(BentoError::UnknownCard("blog".into()))
    );

    let center = home.registry().get(projects).unwrap().bounds.center();
    assert_eq!(
        home.click_at(center),
        Some(CardIntent::Navigate("/projects".into()))
    );
}

#[test]
fn test_unmount_removes_every_particle() {
    let config = config_with_particles(3);
    let (mut home, projects) = desktop_home(&config);

    home.card_enter(projects, 0);
    home.frame(200);
    home.drain_commands().for_each(drop);

    home.unmount(200);
    let removed = home
        .drain_commands()
        .filter(|command| matches!(command, StyleCommand::RemoveParticle { .. }))
        .count();
    assert_eq!(removed, 3);
    assert_eq!(home.particles().pending_tasks(), 0);
    assert!(home.registry().is_empty());
}

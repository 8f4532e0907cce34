//! SignLink Gesture Demo - scripted camera session
//!
//! Usage: gesture-demo [CONFIG.json] [--navigation] [--seed N] [--clean]

use std::time::Duration;

use tokio::time::{sleep, sleep_until, Instant};
use tracing::info;

use signlink_core::GestureLabel;
use signlink_gesture::{ActionTrigger, GestureAction};
use signlink_runtime::{
    init_logging, ChannelSink, ControlCommand, GestureControls, GestureSession, Profile, RuntimeConfig,
};
use signlink_test::{DetectorNoise, FrameScript, HandPose, NoiseConfig};

struct Args {
    config: Option<String>,
    navigation: bool,
    seed: u64,
    clean: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        config: None,
        navigation: false,
        seed: rand::random(),
        clean: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--navigation" => args.navigation = true,
            "--clean" => args.clean = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value.parse()?;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag {}", other).into()),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// A short session touching every gesture
fn demo_script() -> FrameScript {
    FrameScript::default()
        .absent(Duration::from_millis(500))
        .show(HandPose::PointRight, Duration::from_millis(600))
        .show(HandPose::Peace, Duration::from_millis(300))
        .show(HandPose::PointLeft, Duration::from_millis(1800))
        .absent(Duration::from_millis(400))
        .show(HandPose::ThumbsUp, Duration::from_millis(800))
        .show(HandPose::OpenHand, Duration::from_millis(2600))
        .absent(Duration::from_millis(400))
        .show(HandPose::ClosedFist, Duration::from_millis(1000))
        .absent(Duration::from_millis(400))
        .show(HandPose::ClosedFist, Duration::from_millis(2600))
        .absent(Duration::from_millis(500))
}

fn describe(action: &GestureAction) -> String {
    let trigger = match action.trigger {
        ActionTrigger::Confirmed => "confirmed",
        ActionTrigger::HoldCompleted => "held",
    };
    format!(
        "[{:>6.2}s] {:<14} {:<10} -> {} ({})",
        action.at.as_secs_f64(),
        action.display_name,
        trigger,
        action.action_name,
        action.gesture
    )
}

fn describe_command(command: &ControlCommand) -> String {
    match command {
        ControlCommand::Navigate { path, name, announce } => {
            format!("navigate {} ({}){}", path, name, if *announce { ", spoken" } else { "" })
        }
        ControlCommand::Voice { announcement, .. } => format!("voice: {}", announcement),
        ControlCommand::Camera { enabled } => format!("camera {}", if *enabled { "on" } else { "off" }),
        ControlCommand::Speak(text) => format!("say \"{}\"", text),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => RuntimeConfig::from_path(path)?,
        None if args.navigation => RuntimeConfig::for_profile(Profile::Navigation),
        None => RuntimeConfig::default(),
    }
    .apply_env();
    init_logging(&config.log)?;

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           SignLink Gesture Demo                            ║");
    println!("║     Scripted camera session through the gesture engine     ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("profile: {:?}   seed: {}", config.profile, args.seed);
    for binding in config.table.bindings() {
        let hold = if binding.requires_hold() {
            format!(" (hold {:.1}s)", binding.hold.as_secs_f64())
        } else {
            String::new()
        };
        println!("  {} {:<14} -> {}{}", binding.emoji, binding.display_name, binding.action_name, hold);
    }
    println!();

    let (sink, mut actions) = ChannelSink::channel();
    let session = GestureSession::start(&config, sink)?;

    let mut controls = GestureControls::for_profile(config.profile);
    let printer = tokio::spawn(async move {
        while let Some(action) = actions.recv().await {
            println!("{}", describe(&action));
            if let Some(command) = controls.apply(&action) {
                println!("           => {}", describe_command(&command));
            }
        }
        controls
    });

    let noise = if args.clean {
        NoiseConfig::clean()
    } else {
        NoiseConfig::default()
    };
    let mut detector = DetectorNoise::new(noise, args.seed);
    let script = demo_script();
    let start = Instant::now();

    let mut dropped = 0usize;
    let mut last_confirmed = GestureLabel::None;
    for scripted in script.frames() {
        sleep_until(start + Duration::from_micros(scripted.at.as_micros())).await;
        if !session.try_submit(detector.apply(scripted.input))? {
            dropped += 1;
        }

        let snapshot = session.snapshot();
        if snapshot.confirmed != last_confirmed {
            info!(gesture = %snapshot.confirmed, "ui state changed");
            last_confirmed = snapshot.confirmed;
        }
    }
    sleep(Duration::from_millis(100)).await;

    let report = session.stop().await?;
    drop(report.sink);
    let controls = printer.await?;

    let stats = report.stats;
    let noise = detector.stats();
    println!();
    println!("frames: {} ({} with hand, {} malformed, {} dropped at buffer)", stats.frames, stats.frames_with_hand, stats.malformed_frames, dropped);
    println!("detector noise: {} dropped, {} flipped, {} truncated", noise.dropped, noise.flipped, noise.truncated);
    println!("confirmations: {}   releases: {}", stats.confirmations, stats.releases);
    println!(
        "holds: {} started, {} completed, {} cancelled",
        stats.holds_started, stats.holds_completed, stats.holds_cancelled
    );
    println!("actions: {} dispatched, {} suppressed", stats.actions_dispatched, stats.actions_suppressed);
    if let Some((path, name)) = controls.current_page() {
        println!("final page: {} ({})", path, name);
    }
    println!(
        "voice: {}   camera: {}",
        if controls.voice_enabled() { "on" } else { "off" },
        if controls.camera_enabled() { "on" } else { "off" }
    );

    Ok(())
}

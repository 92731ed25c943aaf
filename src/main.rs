//! Perch Toast - demo of the toast scheduler on a terminal surface
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use perch_toast::toast::Surface;
use perch_toast::{
    Gravity, SurfaceSlot, TerminalSurface, ToastConfig, ToastController, ToastDuration,
    ToastRequest,
};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = parse_args()?;

    match options.command {
        Command::Demo => run_scenario(&options, demo),
        Command::Burst => run_scenario(&options, burst),
        Command::Preempt => run_scenario(&options, preempt),
        Command::Config => write_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Demo,
    Burst,
    Preempt,
    Config,
    Help,
    Version,
}

struct Options {
    command: Command,
    no_immediate: bool,
    duration: ToastDuration,
}

fn parse_args() -> Result<Options> {
    let mut args = std::env::args().skip(1);
    let mut command = None;
    let mut no_immediate = false;
    let mut duration = ToastDuration::Short;
    let mut wants_help = false;
    let mut wants_version = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-immediate" => no_immediate = true,
            "--duration" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--duration needs a value (short or long)"))?;
                duration = ToastDuration::from_str(&value)
                    .ok_or_else(|| anyhow::anyhow!("Unknown duration: {value}"))?;
            }
            "--help" => wants_help = true,
            "--version" => wants_version = true,
            _ if command.is_none() => command = Some(arg),
            _ => {
                return Err(anyhow::anyhow!(
                    "Unexpected argument: {arg}\nRun 'perch-toast --help' for usage"
                ));
            }
        }
    }

    let command = match command.as_deref() {
        _ if wants_help => Command::Help,
        _ if wants_version => Command::Version,
        None | Some("demo") => Command::Demo,
        Some("burst") => Command::Burst,
        Some("preempt") => Command::Preempt,
        Some("config") => Command::Config,
        Some("-h" | "help") => Command::Help,
        Some("-v" | "version") => Command::Version,
        Some(other) => {
            return Err(anyhow::anyhow!(
                "Unknown command: {other}\nRun 'perch-toast --help' for usage"
            ));
        }
    };

    Ok(Options {
        command,
        no_immediate,
        duration,
    })
}

fn print_help() {
    let config_path = ToastConfig::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"🐦 Perch Toast - toast scheduler demo

USAGE:
    perch-toast [COMMAND] [OPTIONS]

COMMANDS:
    demo                 Timeline toasts plus a screen change (default)
    burst                Seven toasts at once; the two oldest are dropped
    preempt              A long toast cut short by a newer one
    config               Write the default config file if none exists

OPTIONS:
    --no-immediate       Let each toast finish before the next one shows
    --duration <LEN>     Display length of the demo toasts: short or long
    -h, --help           Show this help message
    -v, --version        Show version information

CONFIG:
    {}

HOMEPAGE:
    {}
"#,
        config_path,
        perch_toast::REPO_URL
    );
}

fn print_version() {
    println!("perch-toast {}", perch_toast::VERSION);
}

fn write_config() -> Result<()> {
    let path = ToastConfig::default_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    ToastConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// The host side of the demo: a slot holding the foreground screen
struct Screens {
    slot: Arc<SurfaceSlot>,
    // The slot only keeps a weak reference
    screen: Arc<dyn Surface>,
}

impl Screens {
    fn open(name: &str) -> Self {
        let screen: Arc<dyn Surface> = Arc::new(TerminalSurface::new(name));
        let slot = Arc::new(SurfaceSlot::new());
        slot.activate(&screen);
        Self { slot, screen }
    }

    fn navigate(&mut self, name: &str) {
        let next: Arc<dyn Surface> = Arc::new(TerminalSurface::new(name));
        println!("── navigating to {name} ──");
        let previous = std::mem::replace(&mut self.screen, next);
        self.slot.replace(&self.screen);
        // Old screen goes away only after the destroy notification
        drop(previous);
    }
}

type Scenario = fn(&ToastController, &mut Screens, ToastDuration);

fn run_scenario(options: &Options, scenario: Scenario) -> Result<()> {
    let mut config = ToastConfig::load()?;
    if options.no_immediate {
        config.immediate_mode = false;
    }
    let linger = config.exit_duration() + Duration::from_millis(50);

    let mut screens = Screens::open("timeline");
    let toasts = ToastController::new(screens.slot.clone(), config)
        .context("Failed to start toast scheduler")?;

    let on_interrupt = toasts.clone();
    ctrlc::set_handler(move || {
        let dropped = on_interrupt.cancel_all();
        println!("\nInterrupted, dropped {dropped} pending toasts");
        std::process::exit(130);
    })
    .context("Failed to install Ctrl-C handler")?;

    scenario(&toasts, &mut screens, options.duration);

    while !toasts.is_idle() {
        thread::sleep(Duration::from_millis(50));
    }
    // Let the last exit animation finish
    thread::sleep(linger);
    Ok(())
}

fn demo(toasts: &ToastController, screens: &mut Screens, duration: ToastDuration) {
    toasts.show("Post published to Mastodon", duration);
    toasts.enqueue(
        ToastRequest::new("3 new posts in your timeline")
            .with_duration(ToastDuration::Long)
            .with_gravity(Gravity::Top)
            .with_delay(Duration::from_millis(500)),
    );

    thread::sleep(Duration::from_millis(1500));
    screens.navigate("profile");
    toasts.show("Profile updated", duration);
}

fn burst(toasts: &ToastController, _screens: &mut Screens, duration: ToastDuration) {
    for i in 1..=7 {
        let id = toasts
            .enqueue(ToastRequest::new(format!("Notification #{i}")).with_duration(duration));
        println!("queued #{i} as {id} ({} pending)", toasts.pending_len());
    }
}

fn preempt(toasts: &ToastController, _screens: &mut Screens, duration: ToastDuration) {
    let slow = toasts.enqueue(
        ToastRequest::new("Uploading media…").with_duration(ToastDuration::Long),
    );
    thread::sleep(Duration::from_millis(1000));

    // Already on screen: cancel leaves it alone
    if !toasts.cancel(slow) {
        println!("{slow} is already showing, cancel ignored");
    }
    toasts.show("Upload failed, retrying", duration);
}

mod demo;
mod window;

use std::path::PathBuf;

use raster::GlyphFont;
use render::{HeadlessPresenter, RenderLoop};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use vizcore::{VisConfig, VizError};

use crate::demo::DemoSim;
use crate::window::DroneApp;

const USAGE: &str = "usage: drone-vis-app [CONFIG.json] [--headless] [--steps N] [--seed N]";

#[derive(Debug, Clone, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    headless: bool,
    steps: u64,
    seed: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            headless: false,
            steps: 10_000,
            seed: 0,
        }
    }
}

fn parse_number(flag: &str, value: Option<String>) -> vizcore::Result<u64> {
    let value =
        value.ok_or_else(|| VizError::InvalidConfig(format!("{flag} needs a value\n{USAGE}")))?;
    value
        .parse()
        .map_err(|_| VizError::InvalidConfig(format!("{flag} expects an integer, got {value:?}")))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> vizcore::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--headless" => parsed.headless = true,
            "--steps" => parsed.steps = parse_number("--steps", args.next())?,
            "--seed" => parsed.seed = parse_number("--seed", args.next())?,
            flag if flag.starts_with("--") => {
                return Err(VizError::InvalidConfig(format!("unknown flag {flag}\n{USAGE}")));
            }
            path if parsed.config.is_none() => parsed.config = Some(PathBuf::from(path)),
            extra => {
                return Err(VizError::InvalidConfig(format!(
                    "unexpected argument {extra}\n{USAGE}"
                )));
            }
        }
    }
    Ok(parsed)
}

/// What a headless run did
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeadlessSummary {
    reached: u64,
    total_reward: f64,
    /// Frames drawn and paced by the render loop
    frames: u64,
    presented: u64,
}

/// Fly the demo without a window or any drawing
fn run_headless(config: &VisConfig, args: &Args) -> vizcore::Result<HeadlessSummary> {
    let typeface = GlyphFont::load(config.display.font_path.as_deref())?;
    let mut render = RenderLoop::new(config.display.clone(), HeadlessPresenter::new(), typeface)?;
    let mut sim = DemoSim::new(args.seed);

    let mut reached = 0u64;
    let mut total_reward = 0.0;
    for _ in 0..args.steps {
        let report = sim.step();
        if report.reached_target {
            reached += 1;
        }
        total_reward += report.reward;
        render.render(&sim.snapshot(false))?;
    }

    let agent = sim.agent();
    let position = sim.state().position;
    log::info!(
        "{} steps over {} games, epsilon {:.3}",
        args.steps,
        agent.games,
        agent.epsilon
    );
    log::info!(
        "final position ({:.2}, {:.2}), {} targets pending, {} steps into the current game",
        position.x,
        position.y,
        sim.targets().len(),
        sim.stats().episode_step
    );
    Ok(HeadlessSummary {
        reached,
        total_reward,
        frames: render.frames(),
        presented: render.presenter().presented(),
    })
}

type AppError = Box<dyn std::error::Error + Send + Sync>;

fn run_window(config: VisConfig, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let typeface = GlyphFont::load(config.display.font_path.as_deref())?;
    let display = config.display;
    let title = display.title.clone();
    let seed = args.seed;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([display.canvas.width as f32, display.canvas.height as f32])
            .with_resizable(false)
            .with_title(&title),
        ..Default::default()
    };
    let create = move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, AppError> {
        Ok(Box::new(DroneApp::new(cc, display, typeface, seed)?))
    };
    eframe::run_native(&title, options, Box::new(create))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => VisConfig::from_path(path)?,
        None => VisConfig::default(),
    };
    config.validate()?;

    TermLogger::init(
        config.level_filter()?,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    if args.headless {
        let summary = run_headless(&config, &args)?;
        log::info!(
            "{} targets reached, total reward {:.2}, {} frames drawn, {} presented",
            summary.reached,
            summary.total_reward,
            summary.frames,
            summary.presented
        );
    } else {
        run_window(config, &args)?;
    }
    Ok(())
}

//! anchorflex-demo: lays out a sign-in screen and prints the solved frames.
//!
//! After the initial pass it replays three live edits (the login-ways row
//! height, the blue button's flex weight and the pink button's width) and
//! prints the frames again after each one.

mod sign_in;

use std::path::PathBuf;

use anchorflex::{FlexLayout, Item};
use anchorflex_harness::{HostConfig, SolverHost};
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::sign_in::SignInScreen;

#[derive(Debug, Parser)]
#[command(name = "anchorflex-demo", about = "Solve the sign-in screen and print its frames")]
struct Args {
    /// JSON host config (bounds, intrinsic_priority, tolerance).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Outline every node with a debug overlay.
    #[arg(long)]
    debug_draw: bool,

    /// Seed for overlay colors.
    #[arg(long)]
    seed: Option<u64>,

    /// Print frames as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => HostConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => HostConfig::default(),
    };
    tracing::info!(width = config.bounds.width, height = config.bounds.height, "Starting sign-in demo");

    let screen = SignInScreen::build();
    let mut layout = FlexLayout::new(screen.tree).context("building layout")?;
    layout.set_root_view(SolverHost::new(config))?;

    if args.debug_draw {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        layout.debug_draw(&mut rng);
    }
    report(&mut layout, "initial", args.json)?;

    // Row was declared without a height, so this has nothing to update.
    layout.set_height(screen.login_ways, 44.0)?;
    report(&mut layout, "login-ways height = 44", args.json)?;

    layout.set_flex(screen.blue_button, 2.0)?;
    report(&mut layout, "blue flex = 2", args.json)?;

    layout.set_width(screen.pink_button, 44.0)?;
    report(&mut layout, "pink width = 44", args.json)?;

    Ok(())
}

fn report(layout: &mut FlexLayout<SolverHost>, step: &str, as_json: bool) -> Result<()> {
    let host = layout.host_mut().context("layout is not attached")?;
    let solution = host.layout_if_needed().clone();
    let host = layout.host().context("layout is not attached")?;

    let mut guides = Vec::new();
    for id in layout.node_ids() {
        let frame = host.guide_frame(id)?;
        guides.push((id, layout.label(id)?, layout.is_synthesized(id)?, frame));
    }
    let mut views = Vec::new();
    for view in host.views() {
        views.push((view.name().to_owned(), host.view_frame(view)?));
    }

    if as_json {
        let document = json!({
            "step": step,
            "guides": guides
                .iter()
                .map(|(id, label, synthesized, frame)| json!({
                    "id": id.raw(),
                    "label": label,
                    "synthesized": synthesized,
                    "frame": frame,
                }))
                .collect::<Vec<_>>(),
            "views": views
                .iter()
                .map(|(name, frame)| json!({ "name": name, "frame": frame }))
                .collect::<Vec<_>>(),
            "conflicts": solution
                .conflicts
                .iter()
                .map(|c| c.description.clone())
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("== {step}");
    for (id, label, synthesized, frame) in &guides {
        if *synthesized {
            continue;
        }
        println!(
            "  {:<14} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            format!("{label} {}", Item::Guide(*id)),
            frame.x,
            frame.y,
            frame.width,
            frame.height
        );
    }
    for (name, frame) in &views {
        println!(
            "  {:<14} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            name, frame.x, frame.y, frame.width, frame.height
        );
    }
    for conflict in &solution.conflicts {
        println!("  conflict: {}", conflict.description);
    }
    Ok(())
}

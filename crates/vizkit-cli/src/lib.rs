//! CLI logic for the vizkit renderer.
//!
//! [`run`] builds the selected model, replays it up to the requested step
//! and writes the scene as an SVG document.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::{Args, Command, NetworkArgs, StepArgs, TreeArgs};
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::{debug, info};

use vizkit::{
    animation::AnimationRegistry, config::AppConfig, export::SvgExporter,
    overlay::OverlayRegistry, render::Renderer, view::ViewTree,
};
use vizkit_models::{DecisionTreeModel, Model, NetworkModel, Simulation};

/// Run the vizkit CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid model parameters
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let svg = match &args.command {
        Command::Network(network) => {
            let mut model = NetworkModel::new(network.layers.clone(), network.run.seed)?;
            drive(&mut model, &network.run);
            if let Some(progress) = network.progress {
                model.advance_signals(progress);
            }
            render(&model, &app_config)?
        }
        Command::Tree(tree) => {
            let mut model = DecisionTreeModel::new(tree.points, tree.run.seed);
            drive(&mut model, &tree.run);
            render(&model, &app_config)?
        }
    };

    let output = &args.command.run_args().output;
    fs::write(output, svg)?;

    info!(output_file = output; "SVG exported successfully");

    Ok(())
}

/// Replays `model` to the requested step and, unless the step should stay
/// pending, completes it.
fn drive(model: &mut dyn Model, run: &StepArgs) {
    info!(model = model.id(), step = run.step, seed = run.seed; "Processing model");
    debug!(model = model.id(); "{}: {}", model.name(), model.description());

    let mut simulation = Simulation::new();
    let step = simulation.run_to(&mut *model, run.step);
    if !run.pending {
        model.complete_step();
    }

    let steps = model.steps();
    if let Some(current) = steps.get(step) {
        debug!(step, label = current.label(), pending = run.pending; "Reached step");
    }
}

fn render(model: &dyn Model, config: &AppConfig) -> Result<String, CliError> {
    let scene = model.build_scene(config.scene()).build();

    let animations = AnimationRegistry::default();
    let overlays = OverlayRegistry::default();
    let renderer = Renderer::new(&animations, &overlays);
    let tree = ViewTree::bind(&scene, &renderer)?;

    let svg = SvgExporter::new(config.style())
        .with_stylesheet(model.stylesheet())
        .export(&tree)?;
    Ok(svg)
}

use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use vizkit_cli::{
    Args, CliError, Command, ConfigError, NetworkArgs, StepArgs, TreeArgs, run,
};

/// Writes `content` as a config file inside `dir` and returns its path.
fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    path.to_string_lossy().to_string()
}

fn step_args(dir: &TempDir, name: &str, step: usize) -> StepArgs {
    StepArgs {
        step,
        seed: 42,
        pending: false,
        output: dir.path().join(name).to_string_lossy().to_string(),
    }
}

fn network(layers: Vec<usize>, run: StepArgs) -> Command {
    Command::Network(NetworkArgs {
        layers,
        progress: None,
        run,
    })
}

fn args(command: Command, config: Option<String>) -> Args {
    Args {
        command,
        config,
        log_level: "off".to_string(),
    }
}

fn read_output(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("Output was not written")
}

#[test]
fn e2e_smoke_test_every_network_step() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(&temp_dir, "");

    // Two layers of weights: input, two signal/activate pairs.
    for step in 0..5 {
        let run_args = step_args(&temp_dir, &format!("network_{step}.svg"), step);
        let output = run_args.output.clone();

        run(&args(network(vec![2, 3, 1], run_args), Some(config.clone())))
            .unwrap_or_else(|err| panic!("step {step} failed: {err}"));

        let svg = read_output(&output);
        assert!(svg.contains("<svg"), "step {step} produced no document");
        assert!(svg.contains("Input Layer"));
        assert!(svg.contains("</svg>"));
    }
}

#[test]
fn e2e_smoke_test_network_signals_mid_flight() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(&temp_dir, "");

    let mut run_args = step_args(&temp_dir, "signals.svg", 1);
    run_args.pending = true;
    let output = run_args.output.clone();

    let command = Command::Network(NetworkArgs {
        layers: vec![3, 5, 5, 2],
        progress: Some(0.5),
        run: run_args,
    });
    run(&args(command, Some(config))).expect("Network render failed");

    let svg = read_output(output);
    assert!(svg.contains(r#"class="viz-signal-shape""#));
}

#[test]
fn e2e_smoke_test_tree() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(&temp_dir, "");

    let run_args = step_args(&temp_dir, "tree.svg", 4);
    let output = run_args.output.clone();
    let command = Command::Tree(TreeArgs {
        points: 5,
        run: run_args,
    });
    run(&args(command, Some(config))).expect("Tree render failed");

    let svg = read_output(output);
    assert!(svg.contains(r#"class="viz-data-point""#));
    assert!(svg.contains("Class A"));
    assert!(svg.contains("Class B"));
}

#[test]
fn e2e_smoke_test_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(
        &temp_dir,
        r##"
        [scene]
        width = 1200.0
        height = 700.0

        [style]
        background_color = "#101010"
        container_class = "dark"
        "##,
    );

    let run_args = step_args(&temp_dir, "styled.svg", 0);
    let output = run_args.output.clone();
    run(&args(network(vec![2, 2], run_args), Some(config))).expect("Render failed");

    let svg = read_output(output);
    assert!(svg.contains(r#"viewBox="0 0 1200 700""#));
    assert!(svg.contains("viz-background"));
    assert!(svg.contains("viz-canvas dark"));
}

#[test]
fn e2e_smoke_test_error_cases() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let missing = temp_dir.path().join("missing.toml");
    let err = run(&args(
        network(vec![2, 2], step_args(&temp_dir, "a.svg", 0)),
        Some(missing.to_string_lossy().to_string()),
    ))
    .unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::MissingFile(_))));

    let bad_color = write_config(&temp_dir, "[style]\nbackground_color = \"bogus\"");
    let err = run(&args(
        network(vec![2, 2], step_args(&temp_dir, "b.svg", 0)),
        Some(bad_color.clone()),
    ))
    .unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Validation(_))));

    let config = write_config(&temp_dir, "");
    let err = run(&args(
        network(vec![4], step_args(&temp_dir, "c.svg", 0)),
        Some(config),
    ))
    .unwrap_err();
    assert!(matches!(err, CliError::Model(_)));

    assert!(!temp_dir.path().join("c.svg").exists());
}

use std::process::Command;

fn run_headless(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lane_racer"))
        .args(args)
        .env("RUST_LOG", "warn,lane_racer=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that a seeded headless race runs to an end
#[test]
fn test_headless_race_runs() {
    let output = run_headless(&["--seed", "7", "--ticks", "400", "--tick-ms", "1"]);

    assert!(
        output.status.success(),
        "Simulation failed to run headless. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("RACE FINISHED"),
        "Race did not finish properly. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Final status:"), "Missing final status");
    assert!(stderr.contains("Distance travelled:"), "Missing distance");

    // The final track drawing goes to stdout
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('P'), "Player missing from drawing: {}", stdout);
}

/// Test that the tick limit stops a race that cannot finish
#[test]
fn test_headless_tick_limit() {
    let output = run_headless(&[
        "--seed",
        "3",
        "--ticks",
        "20",
        "--tick-ms",
        "1",
        "--no-autopilot",
    ]);

    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Tick limit reached"), "stderr: {}", stderr);
    assert!(stderr.contains("Race stopped before the finish line"));
}

/// Test that bad configuration exits with an error
#[test]
fn test_headless_rejects_invalid_configuration() {
    let output = run_headless(&["--race-distance", "0"]);

    assert!(!output.status.success(), "Invalid configuration was accepted");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration"),
        "Missing configuration error. stderr: {}",
        stderr
    );
}

/// Test that an unbounded race distance fails fast instead of generating forever
#[test]
fn test_headless_rejects_infinite_race_distance() {
    let output = run_headless(&["--race-distance", "inf"]);

    assert!(!output.status.success(), "Infinite race distance was accepted");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration"),
        "Missing configuration error. stderr: {}",
        stderr
    );
}

mod support;

use tempfile::tempdir;

use support::{Reply, Script, run_hnprobe, spawn_scripted_server_or_skip};

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn list_prints_selected_cases() -> Result<(), String> {
    let output = run_hnprobe(["--list", "--category", "negative"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("unknown_user_is_absent") || stdout.contains("max_item_is_positive") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn passing_run_writes_report() -> Result<(), String> {
    let script = Script::new().route("/v0/maxitem.json", vec![Reply::json(200, "41234567")]);
    let Some(server) = spawn_scripted_server_or_skip(script)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_dir = dir.path().join("reports");

    let output = run_hnprobe([
        "--base-url".to_owned(),
        server.base_url(),
        "--category".to_owned(),
        "smoke".to_owned(),
        "--filter".to_owned(),
        "max_item_is_positive".to_owned(),
        "--retries".to_owned(),
        "0".to_owned(),
        "--report-format".to_owned(),
        "json".to_owned(),
        "--report-dir".to_owned(),
        report_dir.to_string_lossy().into_owned(),
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("PASS [smoke] max_item_is_positive") || !stdout.contains("1 passed, 0 failed") {
        return Err(describe(&output));
    }

    let content = std::fs::read_to_string(report_dir.join("hnprobe-report.json"))
        .map_err(|err| format!("read report failed: {}", err))?;
    let report: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| format!("parse report failed: {}", err))?;
    if report.get("environment").and_then(serde_json::Value::as_str) != Some("dev") {
        return Err(format!("Unexpected report {}", report));
    }
    let status = report
        .get("results")
        .and_then(|results| results.get(0))
        .and_then(|result| result.get("status"))
        .and_then(serde_json::Value::as_str);
    if status != Some("passed") {
        return Err(format!("Unexpected report {}", report));
    }
    Ok(())
}

#[test]
fn failing_case_exits_non_zero() -> Result<(), String> {
    let script = Script::new()
        .route("/v0/maxitem.json", vec![Reply::json(200, "0")])
        .route("/v0/user/zz_no_such_user_hnprobe.json", vec![Reply::json(200, "null")]);
    let Some(server) = spawn_scripted_server_or_skip(script)? else {
        return Ok(());
    };

    let output = run_hnprobe([
        "--base-url".to_owned(),
        server.base_url(),
        "--filter".to_owned(),
        "_is_".to_owned(),
        "--category".to_owned(),
        "smoke,negative".to_owned(),
        "--retries".to_owned(),
        "0".to_owned(),
        "--no-report".to_owned(),
    ])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("FAIL [smoke] max_item_is_positive")
        || !stdout.contains("PASS [negative] unknown_user_is_absent")
    {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn unknown_environment_fails() -> Result<(), String> {
    let output = run_hnprobe(["--env", "qa", "--no-report"])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("Unknown environment 'qa'") {
        return Err(describe(&output));
    }
    Ok(())
}


use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use support_probe::{
    GARBAGE_RESPONSE, NOT_FOUND_RESPONSE, Reply, TEST_HOST, TRUNCATED_RESPONSE, closed_port,
    run_tamperx, spawn_http_server_or_skip, target_url,
};
use tamperx::http::{
    Dispatcher, HttpExecutor, PROBE_METHODS, ProbeConfig, ProbeError, ProbeOutcome,
    TransportCategory,
};

fn local_config() -> ProbeConfig {
    ProbeConfig {
        timeout: Duration::from_secs(5),
        resolve: vec![(TEST_HOST.to_owned(), IpAddr::V4(Ipv4Addr::LOCALHOST))],
        ..ProbeConfig::default()
    }
}

fn probe(
    config: &ProbeConfig,
    limit: usize,
    target: &str,
    methods: &[&str],
) -> Result<(Vec<ProbeOutcome>, Dispatcher), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    let executor = HttpExecutor::new(config).map_err(|err| err.to_string())?;
    let dispatcher = Dispatcher::new(Arc::new(executor), limit);
    let outcomes = runtime.block_on(dispatcher.dispatch(target, methods));
    Ok((outcomes, dispatcher))
}

fn outcome_for<'a>(outcomes: &'a [ProbeOutcome], method: &str) -> Result<&'a ProbeOutcome, String> {
    outcomes
        .iter()
        .find(|outcome| outcome.method == method)
        .ok_or_else(|| format!("Missing outcome for {}", method))
}

#[test]
fn e2e_not_found_reports_status_and_length() -> Result<(), String> {
    let Some((port, server)) = spawn_http_server_or_skip(Reply::Respond(NOT_FOUND_RESPONSE))?
    else {
        return Ok(());
    };
    let target = target_url(port, "/admin");
    let (outcomes, dispatcher) = probe(&local_config(), 4, &target, &PROBE_METHODS)?;

    let methods: Vec<&str> = outcomes.iter().map(|o| o.method.as_str()).collect();
    if methods != PROBE_METHODS {
        return Err(format!("Unexpected order: {:?}", methods));
    }
    for method in ["GET", "POST", "PUT", "DELETE", "CONNECT", "TRACE", "PATCH"] {
        let outcome = outcome_for(&outcomes, method)?;
        if outcome.result != Ok(tamperx::http::ProbeResponse {
            status: 404,
            content_length: 9,
        }) {
            return Err(format!("Unexpected {} outcome: {:?}", method, outcome));
        }
    }
    let head = outcome_for(&outcomes, "HEAD")?;
    match &head.result {
        Ok(response) if response.status == 404 && response.content_length == 0 => {}
        other => return Err(format!("Unexpected HEAD outcome: {:?}", other)),
    }
    let connect_line = format!("CONNECT {}:{} HTTP/1.1", TEST_HOST, port);
    if !server
        .requests()
        .iter()
        .any(|head| head.starts_with(&connect_line))
    {
        return Err(format!("Expected '{}' in {:?}", connect_line, server.requests()));
    }
    if dispatcher.pool().peak_in_flight() > 4 {
        return Err(format!(
            "Peak in-flight {} exceeded limit",
            dispatcher.pool().peak_in_flight()
        ));
    }
    Ok(())
}

#[test]
fn e2e_refused_connection_is_classified() -> Result<(), String> {
    let port = closed_port()?;
    let target = target_url(port, "/");
    let (outcomes, _dispatcher) = probe(&local_config(), 2, &target, &["GET", "PUT"])?;
    for outcome in &outcomes {
        if outcome.transport_category() != Some(TransportCategory::ConnectionRefused) {
            return Err(format!("Unexpected outcome: {:?}", outcome));
        }
    }
    Ok(())
}

#[test]
fn e2e_timeout_in_url_does_not_mark_failures_as_timeouts() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip(Reply::Respond(GARBAGE_RESPONSE))?
    else {
        return Ok(());
    };
    let target = target_url(port, "/timeout");
    let (outcomes, _) = probe(&local_config(), 2, &target, &["GET", "POST"])?;
    if outcomes.len() != 2 {
        return Err(format!("Unexpected outcomes: {:?}", outcomes));
    }
    for outcome in &outcomes {
        if outcome.transport_category() != Some(TransportCategory::GenericNetworkError) {
            return Err(format!("Unexpected outcome: {:?}", outcome));
        }
    }
    Ok(())
}

#[test]
fn e2e_truncated_body_releases_permits() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip(Reply::Respond(TRUNCATED_RESPONSE))?
    else {
        return Ok(());
    };
    let target = target_url(port, "/");
    let (outcomes, dispatcher) = probe(&local_config(), 2, &target, &["GET", "POST", "DELETE"])?;
    for outcome in &outcomes {
        match outcome.error() {
            Some(ProbeError::ResponseRead { status: 200, .. }) => {}
            other => return Err(format!("Unexpected {} outcome: {:?}", outcome.method, other)),
        }
    }
    if dispatcher.pool().available_permits() != 2 || dispatcher.pool().in_flight() != 0 {
        return Err("Permits were not released after read failures".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_stalled_server_times_out() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip(Reply::Stall(Duration::from_secs(3)))?
    else {
        return Ok(());
    };
    let config = ProbeConfig {
        timeout: Duration::from_secs(1),
        ..local_config()
    };
    let target = target_url(port, "/");
    let (outcomes, _dispatcher) = probe(&config, 1, &target, &["GET"])?;
    let get = outcome_for(&outcomes, "GET")?;
    if get.transport_category() != Some(TransportCategory::Timeout) {
        return Err(format!("Expected timeout, got {:?}", get));
    }
    Ok(())
}

#[test]
fn e2e_headers_reach_the_server() -> Result<(), String> {
    let Some((port, server)) = spawn_http_server_or_skip(Reply::Respond(NOT_FOUND_RESPONSE))?
    else {
        return Ok(());
    };
    let config = ProbeConfig {
        headers: vec![
            ("X-Forwarded-For".to_owned(), "127.0.0.1".to_owned()),
            ("User-Agent".to_owned(), "custom-agent".to_owned()),
        ],
        ..local_config()
    };
    let target = target_url(port, "/");
    let (outcomes, _dispatcher) = probe(&config, 1, &target, &["GET"])?;
    if outcomes.len() != 1 {
        return Err(format!("Unexpected outcomes: {:?}", outcomes));
    }

    let requests = server.requests();
    let head = requests
        .first()
        .map(|head| head.to_ascii_lowercase())
        .ok_or_else(|| "Server saw no request".to_owned())?;
    if !head.starts_with("get / http/1.1") {
        return Err(format!("Unexpected request line: {}", head));
    }
    for needle in ["x-forwarded-for: 127.0.0.1", "user-agent: custom-agent", "accept: */*"] {
        if !head.contains(needle) {
            return Err(format!("Missing '{}' in request:\n{}", needle, head));
        }
    }
    if head.matches("user-agent:").count() != 1 {
        return Err(format!("User-Agent sent more than once:\n{}", head));
    }
    Ok(())
}

#[test]
fn e2e_default_identity_is_sent() -> Result<(), String> {
    let Some((port, server)) = spawn_http_server_or_skip(Reply::Respond(NOT_FOUND_RESPONSE))?
    else {
        return Ok(());
    };
    let target = target_url(port, "/");
    probe(&local_config(), 1, &target, &["GET"])?;
    let requests = server.requests();
    let head = requests
        .first()
        .map(|head| head.to_ascii_lowercase())
        .ok_or_else(|| "Server saw no request".to_owned())?;
    if !head.contains("user-agent: tamperx/") {
        return Err(format!("Default user agent missing:\n{}", head));
    }
    Ok(())
}

#[test]
fn e2e_invalid_target_short_circuits() -> Result<(), String> {
    let (outcomes, dispatcher) = probe(&local_config(), 4, "ftp://example.com", &PROBE_METHODS)?;
    if outcomes != vec![ProbeOutcome::validation()] {
        return Err(format!("Unexpected outcomes: {:?}", outcomes));
    }
    if dispatcher.pool().peak_in_flight() != 0 {
        return Err("No probe should have run".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_cli_missing_url_exits_with_usage() -> Result<(), String> {
    let output = run_tamperx(["--no-banner"])?;
    if output.status.code() != Some(1) {
        return Err(format!("Unexpected exit status: {:?}", output.status));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("[-] URL not provided") || !stdout.contains("Usage:") {
        return Err(format!("Unexpected stdout: {}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_cli_text_table() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip(Reply::Respond(NOT_FOUND_RESPONSE))?
    else {
        return Ok(());
    };
    let url = target_url(port, "/");
    let resolve = format!("{}:127.0.0.1", TEST_HOST);
    let output = run_tamperx([
        "-u",
        url.as_str(),
        "--resolve",
        resolve.as_str(),
        "-t",
        "5",
        "-c",
        "2",
        "-H",
        "X-Custom-IP-Authorization: 127.0.0.1",
    ])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    for needle in [
        "[+] Target Url: http://probe.test:",
        "[+] Custom Headers: 1",
        "[+] Concurrency: 2",
        "[+] Timeout: 5s",
        "Method     Status     Content",
        "--------------------------------",
        "GET        404        9",
        "PATCH      404        9",
    ] {
        if !stdout.contains(needle) {
            return Err(format!("Missing '{}' in stdout:\n{}", needle, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_cli_json_from_config_file() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip(Reply::Respond(NOT_FOUND_RESPONSE))?
    else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tamperx.toml");
    let content = format!(
        "url = \"{}\"\nresolve = [\"{}:127.0.0.1\"]\noutput_format = \"json\"\ntimeout = 5\n",
        target_url(port, "/"),
        TEST_HOST
    );
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config_arg = path.to_string_lossy().into_owned();
    let output = run_tamperx(["--config", config_arg.as_str()])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let value: serde_json::Value =
        serde_json::from_str(&stdout).map_err(|err| format!("Invalid JSON: {}\n{}", err, stdout))?;
    let items = value
        .as_array()
        .ok_or_else(|| format!("Expected array: {}", stdout))?;
    if items.len() != PROBE_METHODS.len() {
        return Err(format!("Expected 8 records, got {}", items.len()));
    }
    let first = items.first().ok_or_else(|| "Missing first record".to_owned())?;
    if first.get("method").and_then(serde_json::Value::as_str) != Some("GET")
        || first.get("status").and_then(serde_json::Value::as_u64) != Some(404)
        || first.get("content_length").and_then(serde_json::Value::as_u64) != Some(9)
    {
        return Err(format!("Unexpected first record: {}", first));
    }
    Ok(())
}

#[test]
fn e2e_cli_rejects_invalid_header_name() -> Result<(), String> {
    let output = run_tamperx([
        "-u",
        "http://example.com",
        "--no-banner",
        "-H",
        "Bad Header: value",
    ])?;
    if output.status.success() {
        return Err("Expected failure for an invalid header name".to_owned());
    }
    Ok(())
}

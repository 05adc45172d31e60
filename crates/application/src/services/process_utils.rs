use crate::ports::{KillOutcome, ProcessControl};
use sots_domain::DomainError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const FORBIDDEN_ARG_CHARS: [char; 2] = [';', '|'];

/// Rejects argument strings carrying shell command separators.
pub fn validate_launch_args(args: &str) -> Result<(), DomainError> {
    if let Some(c) = args.chars().find(|c| FORBIDDEN_ARG_CHARS.contains(c)) {
        return Err(DomainError::ArgsInvalid(format!(
            "forbidden character '{}' in arguments",
            c
        )));
    }
    Ok(())
}

/// Splits an argument string on whitespace. Double quotes group a token and are dropped.
pub fn split_launch_args(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in args.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

/// Polls until `process_name` is visible or `timeout` elapses.
///
/// Returns `Ok(false)` on timeout and `CancelledByUser` when the token fires first.
pub async fn wait_for_process(
    control: &dyn ProcessControl,
    process_name: &str,
    timeout: Duration,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<bool, DomainError> {
    let deadline = Instant::now() + timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(DomainError::CancelledByUser);
        }

        match control.is_running(process_name).await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => debug!(process = %process_name, error = %e, "Process lookup failed"),
        }

        if Instant::now() >= deadline {
            return Ok(false);
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::CancelledByUser),
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

/// Polls until no instance of `process_name` is visible or `timeout` elapses.
///
/// Returns `Ok(false)` when an instance is still listed at the deadline.
pub async fn wait_for_exit(
    control: &dyn ProcessControl,
    process_name: &str,
    timeout: Duration,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<bool, DomainError> {
    let deadline = Instant::now() + timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(DomainError::CancelledByUser);
        }

        match control.is_running(process_name).await {
            Ok(false) => return Ok(true),
            Ok(true) => {}
            Err(e) => debug!(process = %process_name, error = %e, "Process lookup failed"),
        }

        if Instant::now() >= deadline {
            return Ok(false);
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::CancelledByUser),
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

/// Best-effort kill of every instance of `process_name`.
pub async fn kill_quietly(control: &dyn ProcessControl, process_name: &str) {
    match control.kill_by_name(process_name).await {
        Ok(KillOutcome::Killed(count)) => {
            debug!(process = %process_name, count, "Killed running instances")
        }
        Ok(KillOutcome::NotFound) => {}
        Err(e) => warn!(process = %process_name, error = %e, "Failed to kill process"),
    }
}

/// Sleeps for `duration` unless the token fires first.
pub async fn sleep_or_cancel(
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<(), DomainError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(DomainError::CancelledByUser),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

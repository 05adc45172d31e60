use crate::di::Services;
use crate::CheckArgs;
use sots_application::services::StatusUpdate;
use sots_domain::{Profile, ProfileCheckStatus, ALL_SERVICES_LABEL};
use sots_jobs::SuccessCallback;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

/// Runs one verification session and prints live progress.
///
/// Succeeds when at least one profile restored connectivity.
pub async fn run(services: &Services, args: CheckArgs) -> anyhow::Result<bool> {
    let available = services.adapters.profile_catalog.list_profiles().await?;
    let profiles = select_profiles(available, &args)?;
    if profiles.is_empty() {
        warn!("No profiles match the selection");
        return Ok(false);
    }

    let label = args
        .label
        .clone()
        .or_else(|| args.category.map(|c| c.as_str().to_string()))
        .unwrap_or_else(|| ALL_SERVICES_LABEL.to_string());

    let printer = tokio::spawn(print_updates(services.status.subscribe_events()));
    let on_success: SuccessCallback = Arc::new(|profile: &Profile| {
        info!(profile = %profile.id(), "Profile restores connectivity");
    });

    services
        .runner
        .start(profiles, &label, Some(on_success))
        .await;
    let Some(session) = services.runner.wait().await else {
        printer.abort();
        anyhow::bail!("verification session did not complete");
    };
    let _ = printer.await;

    println!();
    if session.cancelled {
        println!("Session cancelled after {} profile(s)", session.entries().len());
    }
    let working: Vec<&str> = session.successful_profiles().map(Profile::label).collect();
    if working.is_empty() {
        println!("No working profiles found");
    } else {
        println!("Working profiles ({}):", working.len());
        for name in working {
            println!("  {}", name);
        }
    }

    Ok(session.success_count() > 0)
}

fn select_profiles(available: Vec<Profile>, args: &CheckArgs) -> anyhow::Result<Vec<Profile>> {
    let mut selected = if args.profiles.is_empty() {
        available
    } else {
        let mut picked = Vec::with_capacity(args.profiles.len());
        for name in &args.profiles {
            match available.iter().find(|p| p.id() == name.as_str()) {
                Some(profile) => picked.push(profile.clone()),
                None => anyhow::bail!("unknown profile '{}'", name),
            }
        }
        picked
    };

    if let Some(category) = args.category {
        selected.retain(|p| p.service_category == category);
    }
    Ok(selected)
}

async fn print_updates(mut events: tokio::sync::broadcast::Receiver<StatusUpdate>) {
    loop {
        match events.recv().await {
            Ok(StatusUpdate::ProfileStatus { profile_id, status }) => {
                if status != ProfileCheckStatus::Idle {
                    println!("{:<40} {}", profile_id, status);
                }
            }
            Ok(StatusUpdate::CategoryStatuses {
                profile_id,
                statuses,
            }) => {
                let mut categories: Vec<_> = statuses.into_iter().collect();
                categories.sort();
                let line = categories
                    .iter()
                    .map(|(tag, ok)| format!("{}:{}", tag, if *ok { "ok" } else { "failed" }))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{:<40} {}", profile_id, line);
            }
            Ok(StatusUpdate::SessionFinished { .. }) | Err(RecvError::Closed) => break,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Status output lagging behind");
            }
        }
    }
}

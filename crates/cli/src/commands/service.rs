use crate::di::Services;
use tracing::info;

pub async fn status(services: &Services) -> bool {
    let state = services.lifecycle.status().await;
    println!("{}", state);
    true
}

pub async fn start(services: &Services, profile: &str) -> anyhow::Result<bool> {
    services.lifecycle.start(profile).await?;
    info!(profile = %profile, "Service running");
    Ok(true)
}

pub async fn restart(services: &Services, profile: &str) -> anyhow::Result<bool> {
    services.lifecycle.restart(profile).await?;
    info!(profile = %profile, "Service restarted");
    Ok(true)
}

pub async fn stop(services: &Services) -> anyhow::Result<bool> {
    services.lifecycle.stop().await?;
    info!("Service stopped");
    Ok(true)
}

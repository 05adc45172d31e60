use crate::di::Services;

pub async fn list(services: &Services) -> anyhow::Result<bool> {
    let profiles = services.adapters.profile_catalog.list_profiles().await?;
    if profiles.is_empty() {
        println!("No profiles found");
        return Ok(false);
    }

    for profile in &profiles {
        println!(
            "{:<40} {:<10} {:<11} {}",
            profile.id(),
            profile.service_category.as_str(),
            profile.provider_category.as_str(),
            profile.label()
        );
    }
    Ok(true)
}

use std::path::PathBuf;

use tracing::{error, info, Instrument};

use storeos_access::app_system::{setup_tracing, PortalSystem};
use storeos_access::config::AppConfig;
use storeos_access::domain::OsType;
use storeos_access::error::AppError;
use storeos_access::navigation::navigation_for;

const CONFIG_ENV: &str = "STOREOS_CONFIG";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let config = match std::env::args().nth(1).or_else(|| std::env::var(CONFIG_ENV).ok()) {
        Some(path) => AppConfig::load(&PathBuf::from(path))?,
        None => AppConfig::default(),
    };
    info!(backend = ?config.storage.backend, "Starting portal walkthrough");

    let system = PortalSystem::start(&config).await?;
    if let Some(session) = system.auth.current().session() {
        info!(email = %session.email, "Ending restored session");
        system.sign_out()?;
    }

    let span = tracing::info_span!("super_admin");
    async {
        let route = system
            .sign_in(&config.bootstrap.email, &config.bootstrap.password)
            .await?;
        info!(route, "Signed in");
        match system.create_operational_manager("manager@businessos.com", "manager123").await {
            Ok(user) => info!(user_id = %user.id, "Operational manager created"),
            Err(e) => error!(error = %e, "Operational manager not created"),
        }
        system.sign_out()?;
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("operational_manager");
    async {
        let route = system.sign_in("manager@businessos.com", "manager123").await?;
        let entries: Vec<&str> = navigation_for(system.auth.current().role())
            .iter()
            .map(|e| e.name)
            .collect();
        info!(route, ?entries, "Signed in");
        for (email, os_type) in [
            ("store@vendor.com", OsType::StoreOs),
            ("space@vendor.com", OsType::SpaceOs),
        ] {
            if let Err(e) = system.create_vendor(email, "vendor123", os_type).await {
                error!(email, error = %e, "Vendor not created");
            }
        }
        for vendor in system.list_vendors().await? {
            info!(email = %vendor.email, os_type = ?vendor.os_type, "Vendor");
        }
        system.sign_out()?;
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("vendor");
    async {
        let route = system.sign_in("store@vendor.com", "vendor123").await?;
        info!(route, "Signed in");
        match system.sign_in("store@vendor.com", "wrong").await {
            Err(e) => info!(error = %e, "Second login refused"),
            Ok(route) => error!(route, "Second login unexpectedly accepted"),
        }
        system.sign_out()?;
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Walkthrough completed successfully");
    Ok(())
}

mod jobs;

use std::sync::Arc;
use std::time::Duration;

use seatlock_lock::{RedisSeatLockRegistry, SeatLockRegistry};
use seatlock_types::Config;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatlock_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting seatlock background jobs...");

    let config = Config::from_env()?;
    let registry: Arc<dyn SeatLockRegistry> = Arc::new(
        RedisSeatLockRegistry::connect_with_deadline(
            &config.registry_url,
            config.lock_table.clone(),
            config.lock_ttl,
            config.registry_deadline,
        )
        .await?,
    );

    tracing::info!("connected to lock registry");

    let scheduler = JobScheduler::new().await?;

    let registry_clone = registry.clone();
    let reap_job = Job::new_async("0 * * * * *", move |_uuid, _l| {
        let registry = registry_clone.clone();
        Box::pin(async move {
            if let Err(e) = jobs::reap_expired_locks(&registry).await {
                tracing::error!("reap_expired_locks job failed: {}", e);
            }
        })
    })?;

    scheduler.add(reap_job).await?;
    tracing::info!("registered job: reap_expired_locks (every minute)");

    scheduler.start().await?;
    tracing::info!("job scheduler started");

    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}

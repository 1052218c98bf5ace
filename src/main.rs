use ingest_core::{Pipeline, WorkerConfig, init_logging};
use ingest_queue::SqsSource;
use ingest_store::MongoConnector;

/// Main entry point for the ingestion worker
///
/// Resolves configuration, installs logging, then runs the pipeline forever:
/// one SQS message per cycle, routed by `MessageGroupId` to a tenant database.
///
/// # Environment Variables
/// - `SQS_QUEUE_URL`: queue to poll (required)
/// - `DB_URI`, `DB_USER`, `DB_PWD`: datastore access (required)
/// - `AWS_REGION`, `SQS_ENDPOINT_URL`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`: queue client
/// - `INGEST_LOG_DIR`: directory for rotated log files (default: "/app/logs")
/// - `INGEST_POLL_WAIT_SECONDS`, `INGEST_IDLE_PAUSE_MS`, `INGEST_SOURCE_ERROR_PAUSE_MS`: pacing
/// - `RUST_LOG`: log filter (default: "info")
///
/// # Returns
/// * `Err(anyhow::Error)` - If configuration or logging cannot be set up. The pipeline itself
///   never returns.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WorkerConfig::from_env()?;
    let _logging = init_logging(config.log_dir())?;

    tracing::info!(
        queue_url = %config.queue().queue_url,
        log_dir = %config.log_dir().display(),
        "starting ingestion worker"
    );

    let source = SqsSource::connect(config.queue()).await;
    let connector = MongoConnector::new(config.datastore());

    Pipeline::new(source, connector, config.pacing()).run().await;

    Ok(())
}

use dotenvy::dotenv;

mod config;
mod db;
mod etl;
mod model;
mod report;
mod source;

use config::Config;
use db::init_db;
use etl::load::Warehouse;
use report::Dashboard;
use source::SampleSource;
use tracing::info;
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "etl.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("=== Starting ETL Pipeline ===");

    let pool = init_db(&config.database_url).await?;

    let mut data_source = SampleSource::from_config(&config);
    let raw = data_source.generate();
    let tables = etl::transform(&raw)?;

    let warehouse = Warehouse::new(pool.clone());
    warehouse.load(&tables).await?;

    let dashboard = Dashboard::new(pool.clone(), &config.report_dir);
    dashboard.render_all().await?;

    pool.close().await;
    info!("=== ETL Completed ===");
    Ok(())
}

use mergington::config::AppConfig;
use mergington::database;
use mergington::services::seed_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tracing_subscriber::fmt::init();

    let pool = database::connect(&config).await?;
    database::migrate(&pool).await?;

    let seeded = seed_service::seed_default_activities(&pool).await?;
    if seeded == 0 {
        println!("seed: activities table already populated, nothing to do");
    } else {
        println!("seed: inserted {} activities", seeded);
    }
    Ok(())
}

use carthorse_app::database;
use tracing::info;

pub(crate) async fn run(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let applied = database::MIGRATOR.iter().count();

    info!(migrations = applied, "database schema is up to date");

    println!("migrations up to date: {applied}");

    Ok(())
}

//! `cguide migrate`: open the database, which applies pending migrations.

use std::path::Path;

use careerguide_infra::filesystem::ensure_data_dir;
use careerguide_infra::sqlite::pool::DatabasePool;
use careerguide_types::config::AppConfig;

use crate::state::database_url;

pub async fn run_migrations(config: &AppConfig, data_dir: &Path, json: bool) -> anyhow::Result<()> {
    ensure_data_dir(data_dir).await?;
    let url = database_url(config, data_dir);
    let pool = DatabasePool::new(&url).await?;
    let applied = pool.applied_migrations().await?;
    pool.close().await;

    if json {
        let rows: Vec<_> = applied
            .iter()
            .map(|m| serde_json::json!({ "version": m.version, "description": m.description }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Database ready ({} migration{} applied)",
        console::style("✓").green().bold(),
        applied.len(),
        if applied.len() == 1 { "" } else { "s" }
    );
    for migration in &applied {
        println!(
            "    {} {}",
            console::style(format!("{:04}", migration.version)).dim(),
            migration.description
        );
    }
    println!();
    Ok(())
}

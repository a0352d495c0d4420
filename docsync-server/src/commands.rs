use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use docsync_core::Engine;
use docsync_types::{PlanAction, PlanEntry, SyncReport};

const NO_DATASET: &str = "NO_DATASET";

/// One pass; pass-level failures are logged, not returned.
pub async fn run_once(engine: &Engine) -> Result<()> {
    match engine.run_pass().await {
        Ok(report) => print_report(&report),
        Err(e) => tracing::error!("Sync cycle failed: {}", e),
    }
    Ok(())
}

pub async fn dry_run(engine: &Engine, json: bool) -> Result<()> {
    tracing::info!("Dry run mode - listing objects only");
    let plan = engine.plan().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("{}", "No candidate objects found.".yellow());
        return Ok(());
    }

    let to_sync = plan.iter().filter(|p| p.action == PlanAction::Sync).count();
    println!("{}", plan_table(&plan));
    println!("\n{} objects, {} to sync", plan.len(), to_sync.to_string().cyan());
    Ok(())
}

fn plan_table(plan: &[PlanEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Action", "Key", "Dataset"]);

    for entry in plan {
        let action = match entry.action {
            PlanAction::Skip => Cell::new(entry.action).fg(Color::DarkGrey),
            PlanAction::Sync => Cell::new(entry.action).fg(Color::Green),
        };
        let dataset = match &entry.collection_id {
            Some(id) => Cell::new(id),
            None => Cell::new(NO_DATASET).fg(Color::Red),
        };
        table.add_row(vec![action, Cell::new(&entry.key), dataset]);
    }
    table
}

fn print_report(report: &SyncReport) {
    let failed = if report.failed > 0 {
        report.failed.to_string().red()
    } else {
        report.failed.to_string().green()
    };
    println!(
        "{} synced ({} created, {} updated), {} skipped, {} failed",
        report.synced.to_string().green(),
        report.created,
        report.updated,
        report.skipped,
        failed
    );
    if !report.state_saved {
        println!("{}", "Warning: sync state was not saved; next pass will resync".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, action: PlanAction, collection_id: Option<&str>) -> PlanEntry {
        PlanEntry { key: key.to_string(), action, collection_id: collection_id.map(String::from) }
    }

    #[test]
    fn test_plan_table_marks_unrouted_keys() {
        let table = plan_table(&[
            entry("infra/a.md", PlanAction::Sync, Some("DSET1")),
            entry("misc/b.md", PlanAction::Sync, None),
            entry("infra/c.md", PlanAction::Skip, Some("DSET1")),
        ]);

        let rendered = table.to_string();
        assert!(rendered.contains("NO_DATASET"));
        assert!(rendered.contains("SKIP"));
        assert!(rendered.contains("SYNC"));
    }
}

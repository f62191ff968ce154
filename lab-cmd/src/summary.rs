//! Dashboard summary and report export.

use anyhow::Context;
use chrono::Utc;
use lab_core::client::ApiClient;
use lab_core::sample::Sample;
use lab_core::user::User;
use lab_report::{write_csv, write_pdf, ReportData, SummaryTable};
use lab_stats::{format_percentage, DashboardSnapshot};
use lab_utils::text::render_table;
use log::info;

/// Samples and users are independent chains, so both load at once.
async fn load_all(client: &ApiClient) -> anyhow::Result<(Vec<Sample>, Vec<User>)> {
    let (samples, users) = tokio::try_join!(client.list_samples(), client.list_users())?;
    Ok((samples, users))
}

pub fn render_summary_table(table: &SummaryTable) -> String {
    let rows: Vec<Vec<String>> = table
        .lines()
        .map(|row| {
            vec![
                row.label.clone(),
                row.count.to_string(),
                format_percentage(row.percentage),
            ]
        })
        .collect();
    format!(
        "{}\n{}",
        table.title,
        render_table(&[table.category_header.as_str(), "Cantidad", "Porcentaje"], &rows)
    )
}

pub fn render_snapshot(snapshot: &DashboardSnapshot) -> String {
    let report = ReportData::from_snapshot(snapshot, Utc::now());
    let cards = render_table(
        &["Indicador", "Valor"],
        &[
            vec!["Total de muestras".to_string(), snapshot.total_samples.to_string()],
            vec!["En análisis".to_string(), snapshot.in_analysis.to_string()],
            vec!["Finalizadas".to_string(), snapshot.finalized.to_string()],
            vec!["Rechazadas".to_string(), snapshot.rejected.to_string()],
            vec!["Total de usuarios".to_string(), snapshot.total_users.to_string()],
            vec!["Clientes".to_string(), snapshot.clients.to_string()],
        ],
    );
    let tables: Vec<String> = report.tables().into_iter().map(render_summary_table).collect();
    format!("{}\n\n{}", cards, tables.join("\n\n"))
}

pub async fn run_summary(client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let (samples, users) = load_all(client).await?;
    let snapshot = DashboardSnapshot::build(&samples, &users);
    info!(
        "[LAB] summary over {} samples and {} users",
        snapshot.total_samples, snapshot.total_users
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_snapshot(&snapshot));
    }
    Ok(())
}

/// Re-derive the aggregates from a fresh load and write the report files.
pub async fn run_report(client: &ApiClient, output: &str, csv: Option<&str>) -> anyhow::Result<()> {
    let (samples, users) = load_all(client).await?;
    let snapshot = DashboardSnapshot::build(&samples, &users);
    let report = ReportData::from_snapshot(&snapshot, Utc::now());

    let pdf = write_pdf(&report)?;
    std::fs::write(output, pdf).with_context(|| format!("writing {}", output))?;
    info!("[LAB] report written to {}", output);

    if let Some(path) = csv {
        let file = std::fs::File::create(path).with_context(|| format!("creating {}", path))?;
        write_csv(&report, file)?;
        info!("[LAB] summary tables written to {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_renders_cards_and_tables() {
        let samples: Vec<Sample> = serde_json::from_value(json!([
            { "estado": "Recibida" },
            { "estado": "Recibida" },
            { "estado": "Rechazada" }
        ]))
        .unwrap();
        let text = render_snapshot(&DashboardSnapshot::build(&samples, &[]));
        assert!(text.contains("Total de muestras  3"));
        assert!(text.contains("Recibida       2         66.7%"));
        assert!(text.contains("Muestras por tipo de agua"));
        assert!(text.contains("Clientes por tipo"));
    }
}

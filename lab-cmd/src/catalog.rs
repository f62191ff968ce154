//! Analysis catalog listing and activation toggle.

use lab_core::analysis::Analysis;
use lab_core::category::AnalysisType;
use lab_core::client::ApiClient;
use lab_utils::text::render_table;
use log::info;

fn format_range(analysis: &Analysis) -> String {
    match analysis.rango {
        Some(range) => match (range.min, range.max) {
            (Some(min), Some(max)) => format!("{} - {}", min, max),
            (Some(min), None) => format!(">= {}", min),
            (None, Some(max)) => format!("<= {}", max),
            (None, None) => "-".to_string(),
        },
        None => "-".to_string(),
    }
}

pub fn analysis_row(analysis: &Analysis) -> Vec<String> {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    vec![
        text(&analysis.id),
        text(&analysis.nombre),
        text(&analysis.unidad),
        text(&analysis.metodo),
        analysis
            .precio
            .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p)),
        format_range(analysis),
        if analysis.is_active() { "activo" } else { "inactivo" }.to_string(),
    ]
}

/// List one analysis type's catalog, or the whole catalog when `kind` is `None`.
pub async fn run_list(client: &ApiClient, kind: Option<AnalysisType>) -> anyhow::Result<()> {
    let analyses = match kind {
        Some(kind) => client.list_analyses_by_category(kind).await?,
        None => client.list_analyses().await?,
    };
    info!("[LAB] catalog: {} analyses", analyses.len());
    let rows: Vec<Vec<String>> = analyses.iter().map(analysis_row).collect();
    println!(
        "{}",
        render_table(
            &["ID", "Nombre", "Unidad", "Método", "Precio", "Rango", "Estado"],
            &rows
        )
    );
    Ok(())
}

pub async fn run_delete(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    client.delete_analysis(id).await?;
    info!("[LAB] analysis {} deleted", id);
    println!("{} eliminado", id);
    Ok(())
}

pub async fn run_toggle(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let analysis = client.toggle_analysis(id).await?;
    let state = if analysis.is_active() { "activo" } else { "inactivo" };
    info!("[LAB] analysis {} is now {}", id, state);
    println!(
        "{} ({}): {}",
        analysis.nombre.as_deref().unwrap_or("-"),
        id,
        state
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_shows_range_and_state() {
        let analysis: Analysis = serde_json::from_value(json!({
            "_id": "a1",
            "nombre": "pH",
            "unidad": "unidades de pH",
            "precio": 15000,
            "rango": "6.5 - 8.5",
            "activo": false
        }))
        .unwrap();
        let row = analysis_row(&analysis);
        assert_eq!(row[0], "a1");
        assert_eq!(row[3], "-");
        assert_eq!(row[4], "15000.00");
        assert_eq!(row[5], "6.5 - 8.5");
        assert_eq!(row[6], "inactivo");
    }
}

//! One page of the samples listing with a text page strip.

use lab_core::client::ApiClient;
use lab_core::results::ResultsRecord;
use lab_core::sample::Sample;
use lab_core::LabError;
use lab_stats::{pagination_items, ItemKind, PaginationItem, PaginationOptions};
use lab_utils::dates::format_optional;
use lab_utils::text::{render_table, truncate};
use log::{info, warn};

pub fn sample_row(sample: &Sample) -> Vec<String> {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    vec![
        text(&sample.id),
        text(&sample.estado),
        text(&sample.tipo_analisis),
        sample
            .tipo_de_agua
            .as_ref()
            .map_or_else(|| "-".to_string(), |w| w.display_label()),
        format_optional(sample.sampled_at()),
        truncate(&text(&sample.nombre_cliente.clone().or(sample.documento.clone())), 28),
        format!("{:.2}", sample.total_price()),
    ]
}

/// e.g. `< 1 ... 4 [5] 6 ... 10 >`; disabled controls are left out.
pub fn render_strip(items: &[PaginationItem]) -> String {
    items
        .iter()
        .filter_map(|item| match item.kind {
            ItemKind::Page => item.page.map(|p| {
                if item.selected {
                    format!("[{}]", p)
                } else {
                    p.to_string()
                }
            }),
            ItemKind::StartEllipsis | ItemKind::EndEllipsis => Some("...".to_string()),
            _ if item.disabled => None,
            ItemKind::First => Some("<<".to_string()),
            ItemKind::Previous => Some("<".to_string()),
            ItemKind::Next => Some(">".to_string()),
            ItemKind::Last => Some(">>".to_string()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn run_samples(client: &ApiClient, page: u32) -> anyhow::Result<()> {
    let page = page.max(1);
    let (samples, total_pages) = client.list_samples_page(page).await?;
    info!("[LAB] page {} -> {} samples", page, samples.len());

    let count = match total_pages {
        Some(total) => total.max(1),
        None => {
            warn!("[LAB] backend did not report a page count");
            page
        }
    };
    let rows: Vec<Vec<String>> = samples.iter().map(sample_row).collect();
    println!(
        "{}",
        render_table(
            &["ID", "Estado", "Análisis", "Agua", "Muestreo", "Cliente", "Total"],
            &rows
        )
    );
    let options = PaginationOptions {
        show_first_button: true,
        show_last_button: true,
        ..PaginationOptions::new(page.min(count), count)
    };
    println!("\n{}", render_strip(&pagination_items(&options)));
    Ok(())
}

/// One row per selected analysis with its entered value, if any.
pub fn result_rows(sample: &Sample, record: &ResultsRecord) -> Vec<Vec<String>> {
    sample
        .analisis_seleccionados
        .iter()
        .map(|analysis| {
            let name = analysis.nombre.clone().unwrap_or_else(|| "-".to_string());
            let value = record
                .value_for(&name)
                .map_or_else(|| "pendiente".to_string(), |v| v.to_string());
            vec![
                name,
                value,
                analysis.unidad.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

/// Show one sample with its entered results. A sample without results yet
/// answers 404 on the results endpoint.
pub async fn run_show(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let sample = client.get_sample(id).await?;
    let record = match client.get_results(id).await {
        Ok(record) => record,
        Err(LabError::Status { status: 404, .. }) => {
            info!("[LAB] sample {} has no results yet", id);
            ResultsRecord::default()
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        render_table(
            &["ID", "Estado", "Análisis", "Agua", "Muestreo", "Cliente", "Total"],
            &[sample_row(&sample)]
        )
    );
    println!(
        "\n{}",
        render_table(&["Análisis", "Valor", "Unidad"], &result_rows(&sample, &record))
    );
    if let Some(change) = record.last_change() {
        println!(
            "\nÚltimo cambio: {} por {}",
            change.fecha.as_deref().unwrap_or("-"),
            change.usuario.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strip_marks_current_page() {
        let items = pagination_items(&PaginationOptions::new(5, 10));
        assert_eq!(render_strip(&items), "< 1 ... 4 [5] 6 ... 10 >");
        let first = pagination_items(&PaginationOptions {
            show_first_button: true,
            ..PaginationOptions::new(1, 3)
        });
        assert_eq!(render_strip(&first), "[1] 2 3 >");
    }

    #[test]
    fn row_falls_back_on_missing_fields() {
        let sample: Sample = serde_json::from_value(json!({
            "_id": 42,
            "estado": "Finalizada",
            "tipoDeAgua": { "tipo": "otra", "tipoPersonalizado": "pozo" },
            "documento": "1020",
            "fechaHoraMuestreo": "2024-02-01T08:30:00Z",
            "analisisSeleccionados": [{ "nombre": "pH", "precio": "12.5" }, { "nombre": "Turbiedad", "precio": 7 }]
        }))
        .unwrap();
        let row = sample_row(&sample);
        assert_eq!(row[0], "42");
        assert_eq!(row[2], "-");
        assert_eq!(row[3], "otra (pozo)");
        assert_eq!(row[4], "2024-02-01 08:30 UTC");
        assert_eq!(row[5], "1020");
        assert_eq!(row[6], "19.50");
    }

    #[test]
    fn results_follow_selected_analyses() {
        let sample: Sample = serde_json::from_value(json!({
            "analisisSeleccionados": [{ "nombre": "pH", "unidad": "unidades" }, { "nombre": "Cloro residual", "unidad": "mg/L" }]
        }))
        .unwrap();
        let record: ResultsRecord = serde_json::from_value(json!({
            "resultados": [{ "analisis": "pH", "valor": "7.2" }]
        }))
        .unwrap();
        let rows = result_rows(&sample, &record);
        assert_eq!(rows[0], vec!["pH", "7.2", "unidades"]);
        assert_eq!(rows[1], vec!["Cloro residual", "pendiente", "mg/L"]);
    }
}

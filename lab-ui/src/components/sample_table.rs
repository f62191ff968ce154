//! Paged table of loaded samples.

use crate::components::PaginationStrip;
use crate::state::AppState;
use dioxus::prelude::*;
use lab_core::sample::Sample;

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn sampled_on(sample: &Sample) -> String {
    sample
        .sampled_at()
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .or_else(|| sample.fecha_hora_muestreo.clone())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn SampleTable() -> Element {
    let mut state = use_context::<AppState>();
    let paging = (state.table_page)();
    let samples = state.samples.read();
    let rows = paging.slice(samples.as_slice()).to_vec();
    drop(samples);

    rsx! {
        div {
            style: "margin: 12px 0;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "Muestras ({paging.total})"
            }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th { style: "text-align: left;", "ID" }
                        th { style: "text-align: left;", "Estado" }
                        th { style: "text-align: left;", "Análisis" }
                        th { style: "text-align: left;", "Agua" }
                        th { style: "text-align: left;", "Muestreo" }
                        th { style: "text-align: right;", "Total" }
                    }
                }
                tbody {
                    for (i, sample) in rows.iter().enumerate() {
                        tr {
                            key: "{i}",
                            td { {cell(&sample.id)} }
                            td { {cell(&sample.estado)} }
                            td { {cell(&sample.tipo_analisis)} }
                            td {
                                {sample.tipo_de_agua.as_ref().map(|w| w.display_label()).unwrap_or_default()}
                            }
                            td { {sampled_on(sample)} }
                            td { style: "text-align: right;", {format!("{:.2}", sample.total_price())} }
                        }
                    }
                }
            }
            PaginationStrip {
                options: paging.options(),
                on_select: move |page| state.go_to_page(page),
            }
        }
    }
}

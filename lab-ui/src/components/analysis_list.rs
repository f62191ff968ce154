//! Catalog entries of the selected analysis type.

use crate::components::LoadingSpinner;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn AnalysisList() -> Element {
    let state = use_context::<AppState>();

    if (state.analyses_loading)() {
        return rsx! {
            LoadingSpinner { label: "Cargando análisis...".to_string() }
        };
    }

    let analyses = state.analyses.read().clone();
    if analyses.is_empty() {
        return rsx! {
            p { style: "color: #888;", "No hay análisis disponibles para este tipo." }
        };
    }

    rsx! {
        ul {
            style: "list-style: none; padding: 0; margin: 0; font-size: 13px;",
            for (i, analysis) in analyses.iter().enumerate() {
                li {
                    key: "{i}",
                    style: if analysis.is_active() { "padding: 4px 0;" } else { "padding: 4px 0; color: #aaa;" },
                    strong { {analysis.nombre.clone().unwrap_or_default()} }
                    if let Some(unidad) = analysis.unidad.as_ref() {
                        " ({unidad})"
                    }
                    if let Some(precio) = analysis.precio {
                        {format!(" - ${:.2}", precio)}
                    }
                    if !analysis.is_active() {
                        " [inactivo]"
                    }
                }
            }
        }
    }
}

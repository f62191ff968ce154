//! Dropdown selector for the analysis catalog shown.

use crate::state::AppState;
use dioxus::prelude::*;
use lab_core::category::{AnalysisType, Category};

/// Analysis type dropdown.
/// Updates `analysis_type` in AppState; the app reloads the catalog on change.
#[component]
pub fn AnalysisTypeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.analysis_type)();

    let on_change = move |evt: Event<FormData>| {
        if let Some(kind) = AnalysisType::from_label(&evt.value()) {
            state.analysis_type.set(kind);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "analysis-type-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Tipo de análisis: "
            }
            select {
                id: "analysis-type-select",
                onchange: on_change,
                for kind in AnalysisType::ALL.iter() {
                    option {
                        value: "{kind.label()}",
                        selected: *kind == selected,
                        "{kind.label()}"
                    }
                }
            }
        }
    }
}

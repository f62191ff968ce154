//! Water-testing lab statistics dashboard.
//!
//! Data flow:
//! 1. On mount: read the session token from localStorage once and build an
//!    `ApiClient` with it. Without a token nothing is requested.
//! 2. Two independent chains accumulate every page of samples and of users.
//! 3. The snapshot (stat cards + five distributions) is recomputed from the
//!    loaded records whenever either collection changes.
//! 4. The analysis catalog reloads whenever the analysis type changes; a newer
//!    selection cancels the older request.
//! 5. "Exportar PDF" re-derives the aggregates and downloads the report.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use lab_core::client::ApiClient;
use lab_core::config::ApiConfig;
use lab_core::latest::LatestRequest;
use lab_core::LabError;
use lab_report::{write_pdf, ReportData};
use lab_stats::DashboardSnapshot;
use lab_ui::browser;
use lab_ui::components::{
    AnalysisList, AnalysisTypeSelector, DistributionTable, ErrorDisplay, LoadingSpinner,
    SampleTable, StatCards,
};
use lab_ui::state::AppState;
use lab_utils::dates::file_stamp;
use log::{debug, error, info};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("lab-dashboard-root"))
        .launch(App);
}

fn export_report(snapshot: &DashboardSnapshot) -> Result<(), String> {
    let report = ReportData::from_snapshot(snapshot, chrono::Utc::now());
    let bytes = write_pdf(&report).map_err(|e| e.to_string())?;
    let file_name = format!("reporte-laboratorio-{}.pdf", file_stamp(&report.generated_at));
    browser::download_bytes(&bytes, &file_name, "application/pdf")
        .map_err(|e| format!("{:?}", e))?;
    info!("[LAB] exported {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let client = use_hook(|| ApiClient::new(ApiConfig::default(), browser::stored_session()));
    let latest = use_hook(|| Rc::new(RefCell::new(LatestRequest::new())));

    // ─── Effect 1: load samples and users once on mount ───
    let mount_client = client.clone();
    use_effect(move || {
        if !mount_client.session().is_authenticated() {
            state.fail(&LabError::Unauthenticated);
            state.samples_loading.set(false);
            state.users_loading.set(false);
            return;
        }

        let samples_client = mount_client.clone();
        spawn(async move {
            match samples_client.list_samples().await {
                Ok(samples) => state.set_samples(samples),
                Err(e) => state.fail(&e),
            }
            state.samples_loading.set(false);
        });

        let users_client = mount_client.clone();
        spawn(async move {
            match users_client.list_users().await {
                Ok(users) => state.users.set(users),
                Err(e) => state.fail(&e),
            }
            state.users_loading.set(false);
        });
    });

    // ─── Effect 2: reload the catalog when the analysis type changes ───
    // Re-runs whenever analysis_type changes; the previous request is aborted.
    let catalog_client = client.clone();
    use_effect(move || {
        let kind = (state.analysis_type)();
        if *state.auth_blocked.peek() {
            return;
        }

        let client = catalog_client.clone();
        let request = latest
            .borrow_mut()
            .run(async move { client.list_analyses_by_category(kind).await });
        let generation = latest.borrow().started();
        state.analyses_loading.set(true);
        spawn(async move {
            match request.await {
                Ok(analyses) => {
                    state.analyses.set(analyses);
                    state.analyses_loading.set(false);
                }
                // A newer selection owns the loading flag now.
                Err(LabError::Cancelled) => {
                    debug!("[LAB] catalog load #{} for {} superseded", generation, kind);
                }
                Err(e) => {
                    state.fail(&e);
                    state.analyses_loading.set(false);
                }
            }
        });
    });

    let snapshot = use_memo(move || {
        DashboardSnapshot::build(&state.samples.read(), &state.users.read())
    });

    let on_export = move |_| {
        if let Err(e) = export_report(&snapshot.read()) {
            error!("[LAB] export failed: {}", e);
            state
                .error_msg
                .set(Some(format!("No se pudo exportar el reporte: {}", e)));
        }
    };

    // ─── Render ───
    let current = snapshot();
    let report = ReportData::from_snapshot(&current, chrono::Utc::now());

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h2 { style: "margin: 8px 0;", "Estadísticas del laboratorio" }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if state.loading() {
                LoadingSpinner {}
            } else if !*state.auth_blocked.read() {
                StatCards { snapshot: current.clone() }

                button {
                    style: "padding: 6px 14px; border: none; border-radius: 4px; background: #2196F3; color: #fff; cursor: pointer;",
                    onclick: on_export,
                    "Exportar PDF"
                }

                div {
                    style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px;",
                    DistributionTable { table: report.status.clone(), color: "#2196F3".to_string() }
                    DistributionTable { table: report.analysis_types.clone(), color: "#4CAF50".to_string() }
                    DistributionTable { table: report.water_types.clone(), color: "#00BCD4".to_string() }
                    DistributionTable { table: report.roles.clone(), color: "#9C27B0".to_string() }
                    DistributionTable { table: report.client_types.clone(), color: "#FF9800".to_string() }
                }

                SampleTable {}

                div {
                    style: "margin-top: 12px; padding-top: 8px; border-top: 1px solid #e0e0e0;",
                    AnalysisTypeSelector {}
                    AnalysisList {}
                }
            }
        }
    }
}

//! Export of lab statistics as a PDF report or CSV tables.
//!
//! A [`ReportData`] is derived from a [`DashboardSnapshot`] and carries five
//! summary tables:
//!
//! - samples by status
//! - samples by analysis type
//! - samples by water type
//! - users by role
//! - clients by client type
//!
//! Four of them (all but roles) are also drawn as donut charts in the PDF.
//! Chart geometry is computed here from the tables, independently of any
//! chart shown on screen.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lab_report::ReportData;
//! use lab_stats::DashboardSnapshot;
//!
//! let snapshot = DashboardSnapshot::build(&[], &[]);
//! let report = ReportData::from_snapshot(&snapshot, chrono::Utc::now());
//! let pdf = lab_report::write_pdf(&report).unwrap();
//! std::fs::write("report.pdf", pdf).unwrap();
//! ```

mod csv_export;
pub mod donut;
pub mod models;
mod pdf;

use chrono::{DateTime, Utc};
use lab_core::category::Category;
use lab_stats::{percentage, DashboardSnapshot, Distribution};
use serde::Serialize;

pub use csv_export::write_csv;
pub use donut::donut_slices;
pub use models::{DonutSlice, Rgb8, SummaryRow, SummaryTable};
pub use pdf::write_pdf;

pub const TOTAL_LABEL: &str = "TOTAL";

impl SummaryTable {
    /// Every known category of `distribution`, in order, then the total row.
    pub fn from_distribution<C: Category>(
        title: &str,
        category_header: &str,
        distribution: &Distribution<C>,
    ) -> Self {
        let total = distribution.total();
        let rows = distribution
            .iter()
            .map(|(category, count)| SummaryRow {
                label: category.label().to_string(),
                count,
                percentage: percentage(count, total),
            })
            .collect();
        Self {
            title: title.to_string(),
            category_header: category_header.to_string(),
            rows,
            total: SummaryRow {
                label: TOTAL_LABEL.to_string(),
                count: total,
                percentage: if total > 0 { 100.0 } else { 0.0 },
            },
        }
    }

    /// Category rows followed by the total row.
    pub fn lines(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }
}

/// Everything the exported document contains.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportData {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub total_samples: usize,
    pub total_users: usize,
    pub status: SummaryTable,
    pub analysis_types: SummaryTable,
    pub water_types: SummaryTable,
    pub roles: SummaryTable,
    pub client_types: SummaryTable,
}

impl ReportData {
    pub fn from_snapshot(snapshot: &DashboardSnapshot, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: "Reporte de estadísticas del laboratorio".to_string(),
            generated_at,
            total_samples: snapshot.total_samples,
            total_users: snapshot.total_users,
            status: SummaryTable::from_distribution(
                "Muestras por estado",
                "Estado",
                &snapshot.status,
            ),
            analysis_types: SummaryTable::from_distribution(
                "Muestras por tipo de análisis",
                "Tipo de análisis",
                &snapshot.analysis_types,
            ),
            water_types: SummaryTable::from_distribution(
                "Muestras por tipo de agua",
                "Tipo de agua",
                &snapshot.water_types,
            ),
            roles: SummaryTable::from_distribution("Usuarios por rol", "Rol", &snapshot.roles),
            client_types: SummaryTable::from_distribution(
                "Clientes por tipo",
                "Tipo de cliente",
                &snapshot.client_types,
            ),
        }
    }

    /// The five tables in document order.
    pub fn tables(&self) -> [&SummaryTable; 5] {
        [
            &self.status,
            &self.analysis_types,
            &self.water_types,
            &self.roles,
            &self.client_types,
        ]
    }

    /// Tables drawn as donut charts.
    pub fn charts(&self) -> [&SummaryTable; 4] {
        [
            &self.status,
            &self.analysis_types,
            &self.water_types,
            &self.client_types,
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use lab_core::sample::Sample;
    use lab_core::user::User;
    use serde_json::json;

    pub(crate) fn sample_report() -> ReportData {
        let samples: Vec<Sample> = serde_json::from_value(json!([
            { "estado": "Recibida", "tipoAnalisis": "Fisicoquímico", "tipoDeAgua": "potable" },
            { "estado": "Recibida", "tipoAnalisis": "Fisicoquímico", "tipoDeAgua": "natural" },
            { "estado": "Rechazada", "tipoAnalisis": "Microbiológico", "tipoDeAgua": "potable" }
        ]))
        .unwrap();
        let users: Vec<User> = serde_json::from_value(json!([
            { "rol": "cliente", "tipo": "empresa" },
            { "rol": "laboratorista" }
        ]))
        .unwrap();
        let snapshot = DashboardSnapshot::build(&samples, &users);
        ReportData::from_snapshot(&snapshot, Utc.with_ymd_and_hms(2024, 5, 2, 9, 15, 0).unwrap())
    }

    #[test]
    fn status_table_rows_and_total() {
        let report = sample_report();
        let table = &report.status;
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[0].label, "Recibida");
        assert_eq!(table.rows[0].count, 2);
        assert_eq!(table.rows[0].percentage, 66.7);
        assert_eq!(table.rows[4].label, "Rechazada");
        assert_eq!(table.rows[4].percentage, 33.3);
        assert_eq!(table.total.label, TOTAL_LABEL);
        assert_eq!(table.total.count, 3);
        assert_eq!(table.total.percentage, 100.0);
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn empty_group_total_is_zero_percent() {
        let report = ReportData::from_snapshot(&DashboardSnapshot::default(), Utc::now());
        for table in report.tables() {
            assert_eq!(table.total.count, 0);
            assert_eq!(table.total.percentage, 0.0);
            assert!(table.rows.iter().all(|r| r.percentage == 0.0));
        }
    }

    #[test]
    fn charts_skip_roles() {
        let report = sample_report();
        let titles: Vec<&str> = report.charts().iter().map(|t| t.title.as_str()).collect();
        assert!(!titles.contains(&report.roles.title.as_str()));
        assert_eq!(report.tables().len(), 5);
    }
}

//! Category histograms for samples and users.

use lab_core::category::{AnalysisType, Category, ClientType, Estado, UserRole, WaterCategory};
use lab_core::sample::Sample;
use lab_core::user::User;
use log::debug;
use serde::Serialize;

/// Count of every known category in fixed order, plus how many records were
/// inspected. Categories absent from the input are present with a zero count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution<C: Category> {
    counts: Vec<(C, usize)>,
    seen: usize,
}

impl<C: Category> Distribution<C> {
    fn empty() -> Self {
        Self {
            counts: C::ALL.iter().map(|c| (*c, 0)).collect(),
            seen: 0,
        }
    }

    pub fn get(&self, category: C) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Records that fell into a known category.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Records inspected, including those with a missing or unknown label.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Records that were inspected but not counted.
    pub fn dropped(&self) -> usize {
        self.seen - self.total()
    }

    /// Share of each category in the counted total, rounded to one decimal.
    pub fn percentages(&self) -> Vec<(C, f64)> {
        let total = self.total();
        self.counts
            .iter()
            .map(|(c, n)| (*c, percentage(*n, total)))
            .collect()
    }
}

/// Bucket `records` by the category `extract` finds in each one.
///
/// Records for which `extract` returns `None` are skipped silently.
pub fn count_by<R, C, F>(records: &[R], extract: F) -> Distribution<C>
where
    C: Category,
    F: Fn(&R) -> Option<C>,
{
    let mut distribution = Distribution::empty();
    for record in records {
        distribution.seen += 1;
        if let Some(category) = extract(record) {
            if let Some(slot) = distribution.counts.iter_mut().find(|(c, _)| *c == category) {
                slot.1 += 1;
            }
        }
    }
    if distribution.dropped() > 0 {
        debug!(
            "[LAB] {} of {} records had no recognised category",
            distribution.dropped(),
            distribution.seen
        );
    }
    distribution
}

pub fn status_distribution(samples: &[Sample]) -> Distribution<Estado> {
    count_by(samples, Sample::estado)
}

pub fn analysis_type_distribution(samples: &[Sample]) -> Distribution<AnalysisType> {
    count_by(samples, Sample::analysis_type)
}

pub fn water_type_distribution(samples: &[Sample]) -> Distribution<WaterCategory> {
    count_by(samples, Sample::water_category)
}

pub fn role_distribution(users: &[User]) -> Distribution<UserRole> {
    count_by(users, User::role)
}

/// Only users holding the client role are inspected.
pub fn client_type_distribution(users: &[User]) -> Distribution<ClientType> {
    let clients: Vec<&User> = users.iter().filter(|u| u.is_client()).collect();
    count_by(&clients, |u| u.client_type())
}

/// `count / total * 100` rounded to one decimal; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// e.g. `66.7%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Everything the dashboard shows, derived from one load of samples and users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_samples: usize,
    pub in_analysis: usize,
    pub finalized: usize,
    pub rejected: usize,
    pub total_users: usize,
    pub clients: usize,
    pub status: Distribution<Estado>,
    pub analysis_types: Distribution<AnalysisType>,
    pub water_types: Distribution<WaterCategory>,
    pub roles: Distribution<UserRole>,
    pub client_types: Distribution<ClientType>,
}

impl DashboardSnapshot {
    pub fn build(samples: &[Sample], users: &[User]) -> Self {
        let status = status_distribution(samples);
        let roles = role_distribution(users);
        Self {
            total_samples: samples.len(),
            in_analysis: status.get(Estado::EnAnalisis),
            finalized: status.get(Estado::Finalizada),
            rejected: status.get(Estado::Rechazada),
            total_users: users.len(),
            clients: roles.get(UserRole::Cliente),
            analysis_types: analysis_type_distribution(samples),
            water_types: water_type_distribution(samples),
            client_types: client_type_distribution(users),
            status,
            roles,
        }
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::build(&[], &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples(values: serde_json::Value) -> Vec<Sample> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn status_counts_fill_every_known_label() {
        let records = samples(json!([
            { "estado": "Recibida" },
            { "estado": "Recibida" },
            { "estado": "Rechazada" }
        ]));
        let dist = status_distribution(&records);
        assert_eq!(dist.get(Estado::Recibida), 2);
        assert_eq!(dist.get(Estado::Rechazada), 1);
        assert_eq!(dist.get(Estado::EnCotizacion), 0);
        assert_eq!(dist.get(Estado::EnAnalisis), 0);
        assert_eq!(dist.get(Estado::Finalizada), 0);
        assert_eq!(dist.iter().count(), Estado::ALL.len());
    }

    #[test]
    fn unknown_and_missing_labels_are_dropped() {
        let records = samples(json!([
            { "estado": "Recibida" },
            { "estado": "recibida" },
            { "estado": "Archivada" },
            {}
        ]));
        let dist = status_distribution(&records);
        assert_eq!(dist.total(), 1);
        assert_eq!(dist.seen(), 4);
        assert_eq!(dist.dropped(), 3);
        assert!(dist.total() <= records.len());
    }

    #[test]
    fn water_types_accept_label_and_object_forms() {
        let records = samples(json!([
            { "tipoDeAgua": "potable" },
            { "tipoDeAgua": { "tipo": "otra", "tipoPersonalizado": "pozo" } },
            { "tipoDeAgua": { "tipo": "residual" } }
        ]));
        let dist = water_type_distribution(&records);
        assert_eq!(dist.get(WaterCategory::Potable), 1);
        assert_eq!(dist.get(WaterCategory::Otra), 1);
        assert_eq!(dist.get(WaterCategory::Residual), 1);
        assert_eq!(dist.get(WaterCategory::Natural), 0);
    }

    #[test]
    fn client_types_ignore_staff() {
        let users: Vec<User> = serde_json::from_value(json!([
            { "rol": "cliente", "tipo": "empresa" },
            { "rol": "cliente", "tipo": "persona natural" },
            { "rol": "laboratorista", "tipo": "empresa" },
            { "rol": "administrador" }
        ]))
        .unwrap();
        let dist = client_type_distribution(&users);
        assert_eq!(dist.seen(), 2);
        assert_eq!(dist.get(ClientType::Empresa), 1);
        assert_eq!(dist.get(ClientType::PersonaNatural), 1);

        let roles = role_distribution(&users);
        assert_eq!(roles.get(UserRole::Cliente), 2);
        assert_eq!(roles.get(UserRole::Laboratorista), 1);
    }

    #[test]
    fn percentages_never_divide_by_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(format_percentage(percentage(2, 3)), "66.7%");
        assert_eq!(format_percentage(0.0), "0.0%");

        let empty = status_distribution(&[]);
        assert!(empty.percentages().iter().all(|(_, p)| p.is_finite() && *p == 0.0));
    }

    #[test]
    fn snapshot_totals() {
        let records = samples(json!([
            { "estado": "En análisis", "tipoAnalisis": "Fisicoquímico" },
            { "estado": "Finalizada", "tipoAnalisis": "Microbiológico" },
            { "estado": "Finalizada" },
            { "estado": "Rechazada" }
        ]));
        let users: Vec<User> = serde_json::from_value(json!([
            { "rol": "cliente", "tipo": "empresa" },
            { "rol": "administrador" }
        ]))
        .unwrap();
        let snapshot = DashboardSnapshot::build(&records, &users);
        assert_eq!(snapshot.total_samples, 4);
        assert_eq!(snapshot.in_analysis, 1);
        assert_eq!(snapshot.finalized, 2);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.total_users, 2);
        assert_eq!(snapshot.clients, 1);
        assert_eq!(snapshot.analysis_types.total(), 2);
    }
}

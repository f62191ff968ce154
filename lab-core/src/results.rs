//! Results entered against a sample, with the backend's edit history.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de;
use crate::sample::SelectedAnalysis;
use crate::validation::ValidationResult;

/// One measured value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultEntry {
    pub analisis: Option<String>,
    #[serde(deserialize_with = "de::lenient_f64")]
    pub valor: Option<f64>,
    pub unidad: Option<String>,
    pub observaciones: Option<String>,
}

/// One edit recorded by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeEntry {
    pub usuario: Option<String>,
    pub fecha: Option<String>,
    pub cambios: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultsRecord {
    #[serde(deserialize_with = "de::lenient_string")]
    pub id_muestra: Option<String>,
    #[serde(deserialize_with = "de::null_as_empty")]
    pub resultados: Vec<ResultEntry>,
    #[serde(deserialize_with = "de::null_as_empty")]
    pub historial_cambios: Vec<ChangeEntry>,
    pub observaciones: Option<String>,
}

impl ResultsRecord {
    pub fn value_for(&self, analysis: &str) -> Option<f64> {
        self.resultados
            .iter()
            .find(|r| r.analisis.as_deref() == Some(analysis))
            .and_then(|r| r.valor)
    }

    pub fn last_change(&self) -> Option<&ChangeEntry> {
        self.historial_cambios.last()
    }
}

/// A value as typed by the operator, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInput {
    pub analisis: String,
    pub valor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,
}

/// Body sent to create or update the results of one sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsDraft {
    pub resultados: Vec<ResultInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

impl ResultsDraft {
    /// Check every selected analysis has a numeric value inside its range.
    /// Errors are keyed by analysis name.
    pub fn validate(&self, selected: &[SelectedAnalysis]) -> ValidationResult {
        let mut result = ValidationResult::new();
        for analysis in selected {
            let Some(name) = analysis.nombre.as_deref() else {
                continue;
            };
            let input = self.resultados.iter().find(|r| r.analisis == name);
            let raw = match input {
                Some(input) if !input.valor.trim().is_empty() => input.valor.as_str(),
                _ => {
                    result.add_error(name, "value is required");
                    continue;
                }
            };
            let Some(value) = parse_value(raw) else {
                result.add_error(name, format!("'{}' is not a number", raw.trim()));
                continue;
            };
            if let Some(range) = analysis.rango {
                if !range.contains(value) {
                    let lo = range.min.map_or("-inf".to_string(), |v| v.to_string());
                    let hi = range.max.map_or("+inf".to_string(), |v| v.to_string());
                    result.add_error(name, format!("{} is outside [{}, {}]", value, lo, hi));
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::NumericRange;
    use serde_json::json;

    fn ph() -> SelectedAnalysis {
        SelectedAnalysis {
            nombre: Some("pH".into()),
            rango: Some(NumericRange {
                min: Some(6.5),
                max: Some(9.0),
            }),
            ..Default::default()
        }
    }

    fn input(analisis: &str, valor: &str) -> ResultInput {
        ResultInput {
            analisis: analisis.into(),
            valor: valor.into(),
            unidad: None,
        }
    }

    #[test]
    fn value_outside_range_is_flagged() {
        let draft = ResultsDraft {
            resultados: vec![input("pH", "9,5")],
            observaciones: None,
        };
        let result = draft.validate(&[ph()]);
        assert_eq!(result.field("pH").len(), 1);
        assert!(result.field("pH")[0].contains("outside"));
    }

    #[test]
    fn missing_and_non_numeric_values() {
        let turbiedad = SelectedAnalysis {
            nombre: Some("Turbiedad".into()),
            ..Default::default()
        };
        let draft = ResultsDraft {
            resultados: vec![input("Turbiedad", "n/a")],
            observaciones: None,
        };
        let result = draft.validate(&[ph(), turbiedad]);
        assert_eq!(result.field("pH"), &["value is required".to_string()]);
        assert!(result.field("Turbiedad")[0].contains("not a number"));
    }

    #[test]
    fn in_range_value_passes() {
        let draft = ResultsDraft {
            resultados: vec![input("pH", " 7.2 ")],
            observaciones: None,
        };
        assert!(draft.validate(&[ph()]).is_valid());
    }

    #[test]
    fn record_with_history() {
        let record: ResultsRecord = serde_json::from_value(json!({
            "idMuestra": "M-001",
            "resultados": [{ "analisis": "pH", "valor": "7.1" }],
            "historialCambios": [
                { "usuario": "lab1", "fecha": "2024-03-06", "cambios": { "pH": 7.0 } },
                { "usuario": "lab2", "fecha": "2024-03-07", "cambios": { "pH": 7.1 } }
            ]
        }))
        .unwrap();
        assert_eq!(record.value_for("pH"), Some(7.1));
        assert_eq!(record.last_change().unwrap().usuario.as_deref(), Some("lab2"));
    }
}

//! Analysis catalog entries.

use serde::{Deserialize, Serialize};

use crate::category::{AnalysisType, Category};
use crate::de;
use crate::sample::{NumericRange, SelectedAnalysis};
use crate::validation::ValidationResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    #[serde(alias = "_id", deserialize_with = "de::lenient_string")]
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub unidad: Option<String>,
    pub metodo: Option<String>,
    #[serde(deserialize_with = "de::lenient_f64")]
    pub precio: Option<f64>,
    #[serde(deserialize_with = "de::lenient_range")]
    pub rango: Option<NumericRange>,
    #[serde(deserialize_with = "de::lenient_bool")]
    pub activo: Option<bool>,
    #[serde(alias = "tipo")]
    pub categoria: Option<String>,
}

impl Analysis {
    pub fn analysis_type(&self) -> Option<AnalysisType> {
        self.categoria.as_deref().and_then(AnalysisType::from_label)
    }

    /// Entries without an explicit flag count as active.
    pub fn is_active(&self) -> bool {
        self.activo.unwrap_or(true)
    }

    /// Copy the catalog entry into a sample's selection, quoting its price.
    pub fn to_selection(&self) -> SelectedAnalysis {
        SelectedAnalysis {
            nombre: self.nombre.clone(),
            unidad: self.unidad.clone(),
            metodo: self.metodo.clone(),
            precio: self.precio,
            rango: self.rango,
        }
    }
}

/// Body sent to create or update a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDraft {
    pub nombre: String,
    pub unidad: String,
    pub metodo: String,
    pub precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rango: Option<NumericRange>,
    pub categoria: String,
    pub activo: bool,
}

impl AnalysisDraft {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("nombre", Some(&self.nombre));
        result.require("unidad", Some(&self.unidad));
        result.require("metodo", Some(&self.metodo));
        if !self.precio.is_finite() || self.precio < 0.0 {
            result.add_error("precio", "must be a non-negative number");
        }
        if let Some(NumericRange {
            min: Some(min),
            max: Some(max),
        }) = self.rango
        {
            if min > max {
                result.add_error("rango", "minimum is greater than maximum");
            }
        }
        if AnalysisType::from_label(&self.categoria).is_none() {
            result.add_error("categoria", format!("unknown category '{}'", self.categoria));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_entry_defaults_to_active() {
        let entry: Analysis = serde_json::from_value(json!({
            "_id": "a1", "nombre": "Cloro residual", "precio": 12000, "tipo": "Fisicoquímico"
        }))
        .unwrap();
        assert!(entry.is_active());
        assert_eq!(entry.analysis_type(), Some(AnalysisType::Fisicoquimico));
        assert_eq!(entry.to_selection().precio, Some(12000.0));
    }

    #[test]
    fn draft_rejects_inverted_range() {
        let draft = AnalysisDraft {
            nombre: "pH".into(),
            unidad: "UpH".into(),
            metodo: "Electrométrico".into(),
            precio: 15000.0,
            rango: Some(NumericRange {
                min: Some(9.0),
                max: Some(6.5),
            }),
            categoria: "Fisicoquímico".into(),
            activo: true,
        };
        let result = draft.validate();
        assert_eq!(result.field("rango").len(), 1);
        assert!(result.field("categoria").is_empty());
    }
}

//! Water sample records as returned by the samples endpoint, and the draft
//! submitted when an operator registers a new sample.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{AnalysisType, Category, Estado, WaterCategory};
use crate::de;
use crate::timestamp::parse_timestamp;
use crate::validation::ValidationResult;

/// Inclusive numeric bounds of an analysis. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One analysis picked for a sample, with the price quoted at selection time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectedAnalysis {
    pub nombre: Option<String>,
    pub unidad: Option<String>,
    pub metodo: Option<String>,
    #[serde(deserialize_with = "de::lenient_f64")]
    pub precio: Option<f64>,
    #[serde(deserialize_with = "de::lenient_range")]
    pub rango: Option<NumericRange>,
}

/// Water-type descriptor: category plus optional free-text sub-category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WaterTypeRepr")]
pub struct WaterType {
    pub tipo: Option<String>,
    pub tipo_personalizado: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WaterTypeObject {
    tipo: Option<String>,
    tipo_personalizado: Option<String>,
    descripcion: Option<String>,
}

/// Older records store the water type as a bare label.
#[derive(Deserialize)]
#[serde(untagged)]
enum WaterTypeRepr {
    Detailed(WaterTypeObject),
    Label(String),
}

impl From<WaterTypeRepr> for WaterType {
    fn from(repr: WaterTypeRepr) -> Self {
        match repr {
            WaterTypeRepr::Detailed(obj) => WaterType {
                tipo: obj.tipo,
                tipo_personalizado: obj.tipo_personalizado,
                descripcion: obj.descripcion,
            },
            WaterTypeRepr::Label(label) => WaterType {
                tipo: Some(label),
                tipo_personalizado: None,
                descripcion: None,
            },
        }
    }
}

impl WaterType {
    pub fn category(&self) -> Option<WaterCategory> {
        self.tipo.as_deref().and_then(WaterCategory::from_label)
    }

    /// Category label, followed by the sub-category when one was given.
    pub fn display_label(&self) -> String {
        match (self.tipo.as_deref(), self.tipo_personalizado.as_deref()) {
            (Some(tipo), Some(sub)) if !sub.trim().is_empty() => format!("{} ({})", tipo, sub.trim()),
            (Some(tipo), _) => tipo.to_string(),
            (None, _) => String::new(),
        }
    }
}

/// A sample as fetched from the backend. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sample {
    #[serde(alias = "_id", alias = "idMuestra", deserialize_with = "de::lenient_string")]
    pub id: Option<String>,
    pub estado: Option<String>,
    pub tipo_analisis: Option<String>,
    pub tipo_de_agua: Option<WaterType>,
    pub fecha_hora_muestreo: Option<String>,
    #[serde(deserialize_with = "de::lenient_string")]
    pub documento: Option<String>,
    pub nombre_cliente: Option<String>,
    pub lugar_muestreo: Option<String>,
    #[serde(deserialize_with = "de::null_as_empty")]
    pub analisis_seleccionados: Vec<SelectedAnalysis>,
    pub observaciones: Option<String>,
}

impl Sample {
    pub fn estado(&self) -> Option<Estado> {
        self.estado.as_deref().and_then(Estado::from_label)
    }

    pub fn analysis_type(&self) -> Option<AnalysisType> {
        self.tipo_analisis.as_deref().and_then(AnalysisType::from_label)
    }

    pub fn water_category(&self) -> Option<WaterCategory> {
        self.tipo_de_agua.as_ref().and_then(WaterType::category)
    }

    pub fn sampled_at(&self) -> Option<DateTime<Utc>> {
        self.fecha_hora_muestreo.as_deref().and_then(parse_timestamp)
    }

    /// Sum of the quoted prices of every selected analysis.
    pub fn total_price(&self) -> f64 {
        self.analisis_seleccionados
            .iter()
            .filter_map(|a| a.precio)
            .sum()
    }
}

/// Body sent to create or update a sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDraft {
    pub documento: Option<String>,
    pub tipo_analisis: Option<String>,
    pub tipo_de_agua: WaterType,
    pub fecha_hora_muestreo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lugar_muestreo: Option<String>,
    pub analisis_seleccionados: Vec<SelectedAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl SampleDraft {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("documento", self.documento.as_deref());
        result.require("tipoAnalisis", self.tipo_analisis.as_deref());
        result.require("tipoDeAgua", self.tipo_de_agua.tipo.as_deref());
        result.require("fechaHoraMuestreo", self.fecha_hora_muestreo.as_deref());

        if let Some(tipo) = self.tipo_analisis.as_deref() {
            if !tipo.trim().is_empty() && AnalysisType::from_label(tipo).is_none() {
                result.add_error("tipoAnalisis", format!("unknown analysis type '{}'", tipo));
            }
        }
        if let Some(tipo) = self.tipo_de_agua.tipo.as_deref() {
            match WaterCategory::from_label(tipo) {
                Some(WaterCategory::Otra) => {
                    result.require("tipoPersonalizado", self.tipo_de_agua.tipo_personalizado.as_deref())
                }
                Some(_) => {}
                None if tipo.trim().is_empty() => {}
                None => result.add_error("tipoDeAgua", format!("unknown water type '{}'", tipo)),
            }
        }
        if let Some(raw) = self.fecha_hora_muestreo.as_deref() {
            if !raw.trim().is_empty() && parse_timestamp(raw).is_none() {
                result.add_error("fechaHoraMuestreo", "not a valid date and time");
            }
        }
        if self.analisis_seleccionados.is_empty() {
            result.add_error("analisisSeleccionados", "select at least one analysis");
        }
        result
    }
}

//! Fixed category label sets used to bucket samples and users.
//!
//! The backend stores these as free-form strings. Each set below is closed:
//! a label that does not match one of the known values (after trimming) is
//! not a category and is left out of any aggregation.

use serde::Serialize;
use std::fmt;

/// A closed, ordered set of labels.
pub trait Category: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Every member, in display order.
    const ALL: &'static [Self];

    /// Label exactly as the backend spells it.
    fn label(self) -> &'static str;

    /// Match a raw backend label. Only surrounding whitespace is ignored.
    fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|c| c.label() == raw)
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category! {
    /// Sample status ("estado").
    Estado {
        Recibida => "Recibida",
        EnCotizacion => "En Cotizacion",
        EnAnalisis => "En análisis",
        Finalizada => "Finalizada",
        Rechazada => "Rechazada",
    }
}

category! {
    /// Analysis family requested for a sample.
    AnalysisType {
        Fisicoquimico => "Fisicoquímico",
        Microbiologico => "Microbiológico",
    }
}

category! {
    /// Top-level water category of a sample.
    WaterCategory {
        Potable => "potable",
        Natural => "natural",
        Residual => "residual",
        Otra => "otra",
    }
}

category! {
    /// Account role.
    UserRole {
        Administrador => "administrador",
        Laboratorista => "laboratorista",
        Cliente => "cliente",
    }
}

category! {
    /// Kind of client, only meaningful for `UserRole::Cliente`.
    ClientType {
        PersonaNatural => "persona natural",
        Empresa => "empresa",
        EntidadPublica => "entidad pública",
        Otro => "otro",
    }
}

impl AnalysisType {
    /// Path segment of the per-family catalog endpoint.
    pub fn catalog_segment(self) -> &'static str {
        match self {
            AnalysisType::Fisicoquimico => "fisicoquimico",
            AnalysisType::Microbiologico => "microbiologico",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_matches_trimmed_exact() {
        assert_eq!(Estado::from_label("Recibida"), Some(Estado::Recibida));
        assert_eq!(Estado::from_label("  En análisis "), Some(Estado::EnAnalisis));
        assert_eq!(Estado::from_label("recibida"), None);
        assert_eq!(Estado::from_label("Archivada"), None);
    }

    #[test]
    fn all_is_in_declaration_order() {
        let labels: Vec<&str> = Estado::ALL.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec!["Recibida", "En Cotizacion", "En análisis", "Finalizada", "Rechazada"]
        );
        assert_eq!(ClientType::ALL.len(), 4);
    }

    #[test]
    fn serializes_as_backend_label() {
        let json = serde_json::to_string(&WaterCategory::Residual).unwrap();
        assert_eq!(json, "\"residual\"");
        assert_eq!(AnalysisType::Microbiologico.to_string(), "Microbiológico");
    }
}

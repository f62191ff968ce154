//! User accounts and the client registration draft.

use serde::{Deserialize, Serialize};

use crate::category::{Category, ClientType, UserRole};
use crate::de;
use crate::validation::{is_valid_email, ValidationResult};

/// Role may arrive as a bare label or as `{ "name": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRepr {
    Label(String),
    Named { name: String },
}

fn lenient_role<'a, D: serde::Deserializer<'a>>(d: D) -> Result<Option<String>, D::Error> {
    let repr = Option::<serde_json::Value>::deserialize(d)?;
    Ok(repr
        .and_then(|v| serde_json::from_value::<RoleRepr>(v).ok())
        .map(|r| match r {
            RoleRepr::Label(label) => label,
            RoleRepr::Named { name } => name,
        }))
}

/// A user account as listed by the users endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "de::lenient_string")]
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "de::lenient_string")]
    pub documento: Option<String>,
    #[serde(deserialize_with = "lenient_role")]
    pub rol: Option<String>,
    /// Client type; only meaningful when the role is `cliente`.
    #[serde(alias = "tipoCliente")]
    pub tipo: Option<String>,
    #[serde(deserialize_with = "de::lenient_bool")]
    pub activo: Option<bool>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        self.rol.as_deref().and_then(UserRole::from_label)
    }

    pub fn is_client(&self) -> bool {
        self.role() == Some(UserRole::Cliente)
    }

    /// Client type of a client account; `None` for staff accounts.
    pub fn client_type(&self) -> Option<ClientType> {
        if !self.is_client() {
            return None;
        }
        self.tipo.as_deref().and_then(ClientType::from_label)
    }
}

/// Body sent when an operator registers a new client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRegistration {
    pub nombre: String,
    pub email: String,
    pub documento: String,
    pub tipo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    pub rol: String,
}

impl ClientRegistration {
    pub fn new(
        nombre: impl Into<String>,
        email: impl Into<String>,
        documento: impl Into<String>,
        tipo: ClientType,
    ) -> Self {
        Self {
            nombre: nombre.into(),
            email: email.into(),
            documento: documento.into(),
            tipo: tipo.label().to_string(),
            telefono: None,
            direccion: None,
            rol: UserRole::Cliente.label().to_string(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("nombre", Some(&self.nombre));
        result.require("documento", Some(&self.documento));
        result.require("email", Some(&self.email));
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            result.add_error("email", "not a valid email address");
        }
        if !self.documento.trim().is_empty()
            && !self.documento.trim().chars().all(|c| c.is_ascii_digit())
        {
            result.add_error("documento", "must contain digits only");
        }
        if ClientType::from_label(&self.tipo).is_none() {
            result.add_error("tipo", format!("unknown client type '{}'", self.tipo));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_type_only_for_clients() {
        let client: User = serde_json::from_value(json!({
            "_id": "u1", "rol": "cliente", "tipo": "empresa"
        }))
        .unwrap();
        assert_eq!(client.client_type(), Some(ClientType::Empresa));

        let staff: User = serde_json::from_value(json!({
            "rol": { "name": "laboratorista" }, "tipo": "empresa"
        }))
        .unwrap();
        assert_eq!(staff.role(), Some(UserRole::Laboratorista));
        assert_eq!(staff.client_type(), None);
    }

    #[test]
    fn activo_accepts_strings() {
        let user: User = serde_json::from_value(json!({ "activo": "inactivo" })).unwrap();
        assert_eq!(user.activo, Some(false));
    }

    #[test]
    fn registration_validation() {
        let ok = ClientRegistration::new("Acueducto Vereda", "acueducto@agua.co", "900123456", ClientType::Empresa);
        assert!(ok.validate().is_valid());

        let mut bad = ok.clone();
        bad.email = "acueducto".into();
        bad.documento = "90-0".into();
        bad.tipo = "cooperativa".into();
        let result = bad.validate();
        assert_eq!(result.field("email").len(), 1);
        assert_eq!(result.field("documento").len(), 1);
        assert_eq!(result.field("tipo").len(), 1);
    }

    #[test]
    fn registration_rejects_malformed_email_domain() {
        let mut reg = ClientRegistration::new("Acueducto Vereda", "acueducto@agua..co", "900123456", ClientType::Empresa);
        assert_eq!(reg.validate().field("email").len(), 1);
        reg.email = "acueducto@agua.c".into();
        assert_eq!(reg.validate().field("email").len(), 1);
    }

    #[test]
    fn registration_serializes_client_role() {
        let body = serde_json::to_value(ClientRegistration::new(
            "Ana", "ana@correo.co", "1020", ClientType::PersonaNatural,
        ))
        .unwrap();
        assert_eq!(body["rol"], "cliente");
        assert_eq!(body["tipo"], "persona natural");
        assert!(body.get("telefono").is_none());
    }
}

//! Command implementations for the lab CLI.
//!
//! Provides subcommands for summarizing samples and users, browsing one
//! page of samples, exporting the statistics report and managing the
//! analysis catalog and client accounts.

use clap::{Args, Subcommand, ValueEnum};
use lab_core::category::{AnalysisType, ClientType};
use lab_core::client::ApiClient;
use lab_core::config::{ApiConfig, Session};
use lab_core::LabError;
use log::error;

pub mod catalog;
pub mod clients;
pub mod samples;
pub mod summary;

/// Backend location and credentials, from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Base URL of the samples / results / analysis service
    #[arg(long, env = "LAB_SAMPLES_API_URL")]
    pub samples_url: Option<String>,

    /// Base URL of the users service
    #[arg(long, env = "LAB_USERS_API_URL")]
    pub users_url: Option<String>,

    /// Bearer token of the operator session
    #[arg(long, env = "LAB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl ApiArgs {
    pub fn config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        if let Some(url) = &self.samples_url {
            config = config.with_samples_url(url.as_str());
        }
        if let Some(url) = &self.users_url {
            config = config.with_users_url(url.as_str());
        }
        config
    }

    pub fn session(&self) -> Session {
        Session::from_optional(self.token.clone())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config(), self.session())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Fisicoquimico,
    Microbiologico,
}

impl From<AnalysisKind> for AnalysisType {
    fn from(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Fisicoquimico => AnalysisType::Fisicoquimico,
            AnalysisKind::Microbiologico => AnalysisType::Microbiologico,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    PersonaNatural,
    Empresa,
    EntidadPublica,
    Otro,
}

impl From<ClientKind> for ClientType {
    fn from(kind: ClientKind) -> Self {
        match kind {
            ClientKind::PersonaNatural => ClientType::PersonaNatural,
            ClientKind::Empresa => ClientType::Empresa,
            ClientKind::EntidadPublica => ClientType::EntidadPublica,
            ClientKind::Otro => ClientType::Otro,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch all samples and users and print their distributions
    Summary {
        /// Print the snapshot as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List one page of samples
    Samples {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = lab_core::config::DEFAULT_PAGE_SIZE)]
        per_page: u32,
    },

    /// Show one sample with its entered results
    Sample {
        #[arg(long)]
        id: String,
    },

    /// Export the statistics report as PDF, optionally with CSV tables
    Report {
        /// Output path for the PDF document
        #[arg(short, long, default_value = "reporte-laboratorio.pdf")]
        output: String,

        /// Also write the summary tables to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },

    /// List the analysis catalog, optionally of one analysis type
    Analyses {
        #[arg(short, long, value_enum)]
        kind: Option<AnalysisKind>,
    },

    /// Remove an analysis from the catalog
    DeleteAnalysis {
        #[arg(long)]
        id: String,
    },

    /// Flip the active flag of a catalog analysis
    ToggleAnalysis {
        #[arg(long)]
        id: String,
    },

    /// Register a new client account
    RegisterClient {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Identity document number
        #[arg(long)]
        document: String,

        #[arg(long, value_enum)]
        client_type: ClientKind,
    },
}

pub async fn run(api: &ApiArgs, command: Command) -> anyhow::Result<()> {
    let client = api.client();
    let outcome = match command {
        Command::Summary { json } => summary::run_summary(&client, json).await,
        Command::Samples { page, per_page } => {
            let client = ApiClient::new(api.config().with_page_size(per_page), api.session());
            samples::run_samples(&client, page).await
        }
        Command::Sample { id } => samples::run_show(&client, &id).await,
        Command::Report { output, csv } => {
            summary::run_report(&client, &output, csv.as_deref()).await
        }
        Command::Analyses { kind } => catalog::run_list(&client, kind.map(Into::into)).await,
        Command::DeleteAnalysis { id } => catalog::run_delete(&client, &id).await,
        Command::ToggleAnalysis { id } => catalog::run_toggle(&client, &id).await,
        Command::RegisterClient {
            name,
            email,
            document,
            client_type,
        } => clients::run_register(&client, name, email, document, client_type.into()).await,
    };

    if let Err(e) = &outcome {
        if let Some(lab_error) = e.downcast_ref::<LabError>() {
            error!("[LAB] {}", lab_error.banner_message());
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_default_urls() {
        let api = ApiArgs {
            samples_url: Some("http://lab.example/api".into()),
            users_url: None,
            token: Some("tok".into()),
        };
        let config = api.config();
        assert_eq!(config.samples_base_url, "http://lab.example/api");
        assert_eq!(config.users_base_url, ApiConfig::default().users_base_url);
        assert!(api.session().is_authenticated());
        assert!(!ApiArgs::default().session().is_authenticated());
    }

    #[test]
    fn value_enums_map_to_categories() {
        assert_eq!(AnalysisType::from(AnalysisKind::Microbiologico), AnalysisType::Microbiologico);
        assert_eq!(ClientType::from(ClientKind::EntidadPublica), ClientType::EntidadPublica);
    }
}

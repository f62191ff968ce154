//! REST client for the lab backend.
//!
//! Every call carries the session's bearer token. A session without a token
//! fails with [`LabError::Unauthenticated`] before anything is sent. There
//! are no retries or timeouts: a failure surfaces to the caller at once.

use log::{debug, info};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::{Analysis, AnalysisDraft};
use crate::category::AnalysisType;
use crate::config::{ApiConfig, Session};
use crate::envelope::{unwrap_item, Envelope, Page};
use crate::error::{LabError, Result};
use crate::fetch::{decode_records, fetch_all_pages, PageSource};
use crate::results::{ResultsDraft, ResultsRecord};
use crate::sample::{Sample, SampleDraft, SelectedAnalysis};
use crate::user::{ClientRegistration, User};

/// Which service a path lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Samples,
    Users,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    session: Session,
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error", "mensaje"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

/// Map a finished response to its JSON body or the matching error.
///
/// 401/403 become [`LabError::Auth`], any other non-2xx [`LabError::Status`].
/// An empty success body is `Null`.
pub fn classify_response(status: StatusCode, body: &str) -> Result<Value> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(LabError::Auth {
            status: status.as_u16(),
            message: error_message(body),
        });
    }
    if !status.is_success() {
        return Err(LabError::Status {
            status: status.as_u16(),
            message: error_message(body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: Session) -> Self {
        Self::with_http_client(Client::new(), config, session)
    }

    pub fn with_http_client(http: Client, config: ApiConfig, session: Session) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Samples => &self.config.samples_base_url,
            Service::Users => &self.config.users_base_url,
        };
        ApiConfig::join(base, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let token = self.session.token().ok_or(LabError::Unauthenticated)?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        classify_response(status, &body)
    }

    async fn get_item<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("[LAB] GET {}", url);
        let body = self.send(self.http.get(url)).await?;
        Ok(serde_json::from_value(unwrap_item(body))?)
    }

    async fn send_item<T, B>(&self, request: RequestBuilder, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(request.json(body)).await?;
        Ok(serde_json::from_value(unwrap_item(body))?)
    }

    /// One unpaginated list call, normalized through the envelope.
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        debug!("[LAB] GET {}", url);
        let body = self.send(self.http.get(url)).await?;
        let Page { records, .. } = Envelope::classify(body).into_page();
        Ok(decode_records(records, url))
    }

    /// Page source over a paginated list endpoint.
    pub fn pages(&self, service: Service, path: &str) -> EndpointPages<'_> {
        EndpointPages {
            client: self,
            url: self.url(service, path),
        }
    }

    // ───────────────────── Samples ─────────────────────

    /// Every sample, all pages accumulated.
    pub async fn list_samples(&self) -> Result<Vec<Sample>> {
        let samples: Vec<Sample> =
            fetch_all_pages(&self.pages(Service::Samples, "muestras"), self.config.max_pages).await?;
        info!("[LAB] loaded {} samples", samples.len());
        Ok(samples)
    }

    /// A single page of samples plus the page count the backend reported.
    pub async fn list_samples_page(&self, page: u32) -> Result<(Vec<Sample>, Option<u32>)> {
        let source = self.pages(Service::Samples, "muestras");
        let Page {
            records,
            total_pages,
        } = Envelope::classify(source.fetch_page(page).await?).into_page();
        Ok((decode_records(records, source.label()), total_pages))
    }

    pub async fn get_sample(&self, id: &str) -> Result<Sample> {
        self.get_item(&self.url(Service::Samples, &format!("muestras/{}", id)))
            .await
    }

    pub async fn create_sample(&self, draft: &SampleDraft) -> Result<Sample> {
        draft.validate().into_result()?;
        let url = self.url(Service::Samples, "muestras");
        info!("[LAB] registering sample for {:?}", draft.documento);
        self.send_item(self.http.post(url), draft).await
    }

    pub async fn update_sample(&self, id: &str, draft: &SampleDraft) -> Result<Sample> {
        draft.validate().into_result()?;
        let url = self.url(Service::Samples, &format!("muestras/{}", id));
        self.send_item(self.http.put(url), draft).await
    }

    // ───────────────────── Results ─────────────────────

    pub async fn get_results(&self, sample_id: &str) -> Result<ResultsRecord> {
        self.get_item(&self.url(
            Service::Samples,
            &format!("ingreso-resultados/{}", sample_id),
        ))
        .await
    }

    /// Validate against the sample's analyses, then submit.
    pub async fn create_results(
        &self,
        sample_id: &str,
        draft: &ResultsDraft,
        selected: &[SelectedAnalysis],
    ) -> Result<ResultsRecord> {
        draft.validate(selected).into_result()?;
        let url = self.url(Service::Samples, &format!("ingreso-resultados/{}", sample_id));
        self.send_item(self.http.post(url), draft).await
    }

    pub async fn update_results(
        &self,
        sample_id: &str,
        draft: &ResultsDraft,
        selected: &[SelectedAnalysis],
    ) -> Result<ResultsRecord> {
        draft.validate(selected).into_result()?;
        let url = self.url(Service::Samples, &format!("ingreso-resultados/{}", sample_id));
        self.send_item(self.http.put(url), draft).await
    }

    // ───────────────────── Users ─────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users: Vec<User> =
            fetch_all_pages(&self.pages(Service::Users, "usuarios"), self.config.max_pages).await?;
        info!("[LAB] loaded {} users", users.len());
        Ok(users)
    }

    pub async fn register_client(&self, registration: &ClientRegistration) -> Result<User> {
        registration.validate().into_result()?;
        let url = self.url(Service::Users, "usuarios/registro");
        info!("[LAB] registering client {}", registration.documento);
        self.send_item(self.http.post(url), registration).await
    }

    // ───────────────────── Analysis catalog ─────────────────────

    pub async fn list_analyses_by_category(&self, kind: AnalysisType) -> Result<Vec<Analysis>> {
        let url = self.url(
            Service::Samples,
            &format!("analisis/{}", kind.catalog_segment()),
        );
        self.get_list(&url).await
    }

    pub async fn list_analyses(&self) -> Result<Vec<Analysis>> {
        self.get_list(&self.url(Service::Samples, "analisis")).await
    }

    pub async fn create_analysis(&self, draft: &AnalysisDraft) -> Result<Analysis> {
        draft.validate().into_result()?;
        let url = self.url(Service::Samples, "analisis");
        self.send_item(self.http.post(url), draft).await
    }

    pub async fn update_analysis(&self, id: &str, draft: &AnalysisDraft) -> Result<Analysis> {
        draft.validate().into_result()?;
        let url = self.url(Service::Samples, &format!("analisis/{}", id));
        self.send_item(self.http.put(url), draft).await
    }

    pub async fn delete_analysis(&self, id: &str) -> Result<()> {
        let url = self.url(Service::Samples, &format!("analisis/{}", id));
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Flip the active flag of a catalog entry; returns the updated entry.
    pub async fn toggle_analysis(&self, id: &str) -> Result<Analysis> {
        let url = self.url(Service::Samples, &format!("analisis/{}/toggle-estado", id));
        let body = self.send(self.http.patch(url)).await?;
        Ok(serde_json::from_value(unwrap_item(body))?)
    }
}

/// A paginated list endpoint bound to a client.
pub struct EndpointPages<'a> {
    client: &'a ApiClient,
    url: String,
}

impl PageSource for EndpointPages<'_> {
    fn label(&self) -> &str {
        &self.url
    }

    async fn fetch_page(&self, page: u32) -> Result<Value> {
        let request = self
            .client
            .http
            .get(&self.url)
            .query(&[("page", page), ("limit", self.client.config.page_size)]);
        self.client.send(request).await
    }
}

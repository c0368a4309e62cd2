//! HTTP client for the scheduling service
//!
//! One client serves both the shifts query and the patient lookup; they share
//! credentials and TLS settings but may live on different hosts.

use super::models::{PatientRecord, RawShift};
use super::traits::{LocationLookup, ScheduleSource};
use crate::config::SchedulingConfig;
use crate::config::SecretString;
use crate::domain::{RemoteError, Result, ShiftWatchError, SubjectId};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Scheduling API client
///
/// # Example
///
/// ```no_run
/// use shiftwatch::adapters::scheduling::{ScheduleSource, SchedulingApiClient};
/// use shiftwatch::config::load_config;
/// use chrono::NaiveDate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("shiftwatch.toml")?;
/// let client = SchedulingApiClient::new(&config.scheduling)?;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
/// let shifts = client.fetch_shifts(start, end).await?;
/// # Ok(())
/// # }
/// ```
pub struct SchedulingApiClient {
    /// HTTP client for making requests
    client: Client,

    /// Base URL of the shifts endpoint host
    base_url: Url,

    /// Base URL of the patient endpoint host
    patients_base_url: Url,

    employee_id: String,
    calendar_type: String,
    username: String,
    password: SecretString,
}

impl SchedulingApiClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(config: &SchedulingConfig) -> Result<Self> {
        let base_url = parse_base_url("scheduling.base_url", &config.base_url)?;
        let patients_base_url =
            parse_base_url("scheduling.patients_base_url", config.patients_url())?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the scheduling API");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            ShiftWatchError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url,
            patients_base_url,
            employee_id: config.employee_id.clone(),
            calendar_type: config.calendar_type.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }

    /// URL of the shifts query for a date range
    fn shifts_url(&self, start: NaiveDate, end: NaiveDate) -> Url {
        let mut url = endpoint(&self.base_url, &["scheduling", "admin", "getshifts"]);
        url.query_pairs_mut()
            .append_pair("start", &start.to_string())
            .append_pair("end", &end.to_string())
            .append_pair("calendar_type", &self.calendar_type)
            .append_pair("employees", &self.employee_id);
        url
    }

    /// URL of the patient record for a subject
    fn patient_url(&self, subject_id: &SubjectId) -> Url {
        endpoint(
            &self.patients_base_url,
            &["api", "v1", "patients", subject_id.as_str()],
        )
    }

    /// Authenticated GET decoding a JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, RemoteError> {
        let resp = self
            .client
            .get(url)
            .header("Authorization", self.auth_header_value())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout(e.to_string())
                } else {
                    RemoteError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ScheduleSource for SchedulingApiClient {
    async fn fetch_shifts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<Vec<RawShift>, RemoteError> {
        let url = self.shifts_url(start, end);

        tracing::debug!(
            start = %start,
            end = %end,
            employee_id = %self.employee_id,
            "Downloading shifts"
        );

        let shifts: Vec<RawShift> = self.get_json(url).await?;

        tracing::info!(count = shifts.len(), "Downloaded shifts");
        Ok(shifts)
    }
}

#[async_trait]
impl LocationLookup for SchedulingApiClient {
    async fn location_for(
        &self,
        subject_id: &SubjectId,
    ) -> std::result::Result<String, RemoteError> {
        tracing::debug!(subject_id = %subject_id, "Looking up patient location");

        let record: PatientRecord = self.get_json(self.patient_url(subject_id)).await?;
        record.city.ok_or_else(|| {
            RemoteError::InvalidResponse(format!("patient {subject_id} has no city"))
        })
    }
}

fn parse_base_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| ShiftWatchError::Configuration(format!("{field} is not a valid URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ShiftWatchError::Configuration(format!(
            "{field} cannot be used as a base URL: {value}"
        )));
    }
    Ok(url)
}

/// Appends path segments to a base URL, keeping any path prefix it has
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

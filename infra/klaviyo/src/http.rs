use crate::error::{ApiError, ApiErrorExt};
use crate::wire::{CreateListForm, IdentifyPayload, ListPage, MemberForm, person_from_json};
use crate::MarketingApi;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ksync_domain::config::KlaviyoConfig;
use ksync_domain::{MarketingList, Person, PersonConfiguration};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument};

const DEFAULT_LIST_TYPE: &str = "list";
const IDENTIFY_ACCEPTED: &str = "1";

/// [`MarketingApi`] over the Klaviyo v1 REST endpoints.
#[derive(Clone)]
pub struct KlaviyoHttpApi {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl fmt::Debug for KlaviyoHttpApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KlaviyoHttpApi")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl KlaviyoHttpApi {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be initialized.
    pub fn new(config: &KlaviyoConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        info!(base_url = %config.base_url, timeout_secs = config.timeout_seconds, "Klaviyo client ready");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            page_size: config.page_size.max(1),
        })
    }

    /// Replaces the configured API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = |message: String| ApiError::InvalidRequest { message: message.into(), context: None };

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("Invalid base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::Unauthorized {
                message: "No API key configured".into(),
                context: None,
            });
        }
        Ok(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "Klaviyo request failed");
        Err(status_error(status, body))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let bytes = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&bytes).context("Unexpected response body")
    }

    async fn update_person(
        &self,
        api_key: &str,
        id: &str,
        config: &PersonConfiguration,
    ) -> Result<Person, ApiError> {
        let request = self
            .client
            .put(self.endpoint(&["api", "v1", "person", id])?)
            .query(&[("api_key", api_key)])
            .json(config);
        let raw: Map<String, Value> = self.json(request).await?;
        Ok(person_from_json(raw))
    }

    async fn identify_person(
        &self,
        api_key: &str,
        config: &PersonConfiguration,
    ) -> Result<Person, ApiError> {
        let payload = serde_json::to_vec(&IdentifyPayload { token: api_key, properties: config })
            .context("Failed to encode identify payload")?;
        let data = STANDARD.encode(payload);

        let request = self.client.post(self.url("/api/identify")).form(&[("data", data)]);
        let body = self.send(request).await?.text().await?;

        if body.trim() != IDENTIFY_ACCEPTED {
            return Err(ApiError::Rejected {
                message: format!("identify returned '{}'", body.trim()).into(),
                context: None,
            });
        }
        Ok(Person::from(config))
    }
}

impl MarketingApi for KlaviyoHttpApi {
    #[instrument(skip(self))]
    async fn all_lists(&self) -> Result<Vec<MarketingList>, ApiError> {
        let api_key = self.api_key()?;
        let page_size = self.page_size.to_string();
        let mut lists = Vec::new();

        for page in 0_u32.. {
            let page_str = page.to_string();
            let request = self.client.get(self.url("/api/v1/lists")).query(&[
                ("api_key", api_key),
                ("page", page_str.as_str()),
                ("count", page_size.as_str()),
            ]);
            let ListPage { data, total } = self.json(request).await?;
            let fetched = data.len();
            lists.extend(data);

            if fetched == 0 || lists.len() >= total {
                break;
            }
        }

        debug!(count = lists.len(), "Fetched lists");
        Ok(lists)
    }

    #[instrument(skip(self))]
    async fn create_list(&self, name: &str) -> Result<MarketingList, ApiError> {
        let form = CreateListForm { api_key: self.api_key()?, name, list_type: DEFAULT_LIST_TYPE };
        let request = self.client.post(self.url("/api/v1/lists")).form(&form);
        self.json(request).await
    }

    #[instrument(skip_all, fields(person_id = ?config.person_id()))]
    async fn save_person(&self, config: &PersonConfiguration) -> Result<Person, ApiError> {
        let api_key = self.api_key()?;
        match config.person_id() {
            Some(id) => self.update_person(api_key, &id, config).await,
            None => self.identify_person(api_key, config).await,
        }
    }

    #[instrument(skip_all, fields(list = %list.full_id()))]
    async fn add_person_to_list(&self, person: &Person, list: &MarketingList) -> Result<(), ApiError> {
        let api_key = self.api_key()?;
        let Some(email) = person.email.as_deref().filter(|e| !e.is_empty()) else {
            return Err(ApiError::InvalidRequest {
                message: "Person has no e-mail address".into(),
                context: Some("List subscription".into()),
            });
        };

        let form = MemberForm { api_key, email, confirm_optin: false };
        let url = self.endpoint(&["api", "v1", "list", &list.id, "members"])?;
        let request = self.client.post(url).form(&form);
        self.send(request).await?;
        Ok(())
    }
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("Unknown status").to_owned()
    } else {
        body
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Unauthorized { message: message.into(), context: None }
        },
        StatusCode::NOT_FOUND => ApiError::NotFound { message: message.into(), context: None },
        StatusCode::TOO_MANY_REQUESTS => {
            ApiError::RateLimited { message: message.into(), context: None }
        },
        _ => ApiError::Status { status: status.as_u16(), message: message.into(), context: None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_reason_codes() {
        assert_eq!(status_error(StatusCode::FORBIDDEN, String::new()).kind(), "unauthorized");
        assert_eq!(status_error(StatusCode::NOT_FOUND, "gone".to_owned()).kind(), "not_found");
        assert_eq!(status_error(StatusCode::TOO_MANY_REQUESTS, String::new()).kind(), "rate_limited");

        let err = status_error(StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.kind(), "status");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn api_key_is_redacted_from_debug_output() {
        let config = KlaviyoConfig { api_key: "pk_secret".to_owned(), ..KlaviyoConfig::default() };
        let api = KlaviyoHttpApi::new(&config).unwrap();
        assert!(!format!("{api:?}").contains("pk_secret"));
    }

    #[test]
    fn person_keys_exclude_id_and_object() {
        let api = KlaviyoHttpApi::new(&KlaviyoConfig::default()).unwrap();
        let keys = api.person_attribute_keys();
        assert_eq!(keys.first().map(String::as_str), Some("$email"));
        assert!(!keys.iter().any(|k| k == "id" || k == "object"));
        assert_eq!(keys.len(), 11);
    }
}

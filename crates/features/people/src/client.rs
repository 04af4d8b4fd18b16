use crate::error::{FailureReason, SyncError, SyncErrorExt};
use ksync_domain::{MarketingList, Person, PersonConfiguration};
use ksync_klaviyo::MarketingApi;
use std::sync::Arc;
use tracing::{error, warn};

/// The one remote API handle of a deployment.
///
/// Built at the application boundary and cloned into every component that talks to
/// the remote API. Failures are logged here and returned with a reason code and an
/// end-user notice; nothing is retried.
#[derive(Debug)]
pub struct KlaviyoClient<A> {
    api: Arc<A>,
}

impl<A> Clone for KlaviyoClient<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api) }
    }
}

impl<A: MarketingApi> KlaviyoClient<A> {
    pub fn new(api: A) -> Self {
        Self { api: Arc::new(api) }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// All remote lists.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] when the lists cannot be fetched.
    pub async fn lists(&self) -> Result<Vec<MarketingList>, SyncError> {
        self.api
            .all_lists()
            .await
            .context("Unable to retrieve lists from Klaviyo")
            .inspect_err(|e| log_failure("lists", e))
    }

    /// # Errors
    /// Returns [`SyncError::Remote`] when the list cannot be created.
    pub async fn create_list(&self, name: &str) -> Result<MarketingList, SyncError> {
        self.api
            .create_list(name)
            .await
            .context("Unable to create list")
            .inspect_err(|e| log_failure("create_list", e))
    }

    /// # Errors
    /// Returns [`SyncError::Remote`] when the person cannot be saved.
    pub async fn save_person(&self, config: &PersonConfiguration) -> Result<Person, SyncError> {
        self.api
            .save_person(config)
            .await
            .context("Unable to save person to Klaviyo")
            .inspect_err(|e| log_failure("save_person", e))
    }

    /// # Errors
    /// Returns [`SyncError::Remote`] when the subscription fails.
    pub async fn add_person_to_list(
        &self,
        person: &Person,
        list: &MarketingList,
    ) -> Result<(), SyncError> {
        self.api
            .add_person_to_list(person, list)
            .await
            .context("Unable to subscribe person to list")
            .inspect_err(|e| log_failure("add_person_to_list", e))
    }

    /// Person attribute keys that fields can be mapped to.
    #[must_use]
    pub fn person_attribute_keys(&self) -> Vec<String> {
        self.api.person_attribute_keys()
    }
}

fn log_failure(operation: &'static str, err: &SyncError) {
    let reason = err.reason();
    match reason {
        FailureReason::RateLimited | FailureReason::Transport => {
            warn!(operation, %reason, error = %err, "Klaviyo call failed");
        },
        _ => error!(operation, %reason, error = %err, "Klaviyo call failed"),
    }
}

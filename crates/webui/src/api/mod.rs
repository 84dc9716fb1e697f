//! REST client for the backend.
//!
//! Every wrapper issues exactly one HTTP call. Failures of any kind pass
//! through the [`ErrorInterceptor`], which shows an error notification and
//! returns the error to the caller unchanged.

mod analysis;
mod error;
mod files;
mod interceptor;
pub mod model;
pub mod request;
mod repositories;
mod test_cases;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;

pub use error::{ApiError, FALLBACK_MESSAGE};
pub use interceptor::{ErrorInterceptor, Notifier};
pub use request::{ApiRequest, UploadFile};
pub use transport::{ApiResponse, BrowserTransport, Transport};

use crate::{BASE_URL, REQUEST_TIMEOUT_MS};
use log::debug;
use serde::de::DeserializeOwned;
use std::{rc::Rc, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix of every request path, e.g. `/api`.
    pub base_url: String,
    /// Deadline of a single request.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    pub fn timeout_millis(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Anything the client can turn into a request, including a request whose
/// body failed to encode.
pub trait IntoApiRequest {
    fn into_api_request(self) -> Result<ApiRequest, ApiError>;
}

impl IntoApiRequest for ApiRequest {
    fn into_api_request(self) -> Result<ApiRequest, ApiError> {
        Ok(self)
    }
}

impl IntoApiRequest for Result<ApiRequest, ApiError> {
    fn into_api_request(self) -> Result<ApiRequest, ApiError> {
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ApiConfig>,
    transport: Rc<dyn Transport>,
    interceptor: ErrorInterceptor,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.transport, &other.transport)
            && self.interceptor.same_notifier(&other.interceptor)
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            interceptor: ErrorInterceptor::new(notifier),
        }
    }

    /// Client talking to the backend through the browser's Fetch API.
    pub fn browser(config: ApiConfig, notifier: Rc<dyn Notifier>) -> Self {
        Self::new(config, Rc::new(BrowserTransport), notifier)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn execute(&self, request: impl IntoApiRequest) -> Result<ApiResponse, ApiError> {
        let request = request.into_api_request()?;
        debug!("{} {}", request.method, request.path);
        self.transport
            .send(&self.config, request)
            .await?
            .error_for_status()
    }

    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        request: impl IntoApiRequest,
    ) -> Result<T, ApiError> {
        let result = match self.execute(request).await {
            Ok(response) => response.json(),
            Err(err) => Err(err),
        };
        self.interceptor.intercept(result)
    }

    /// For endpoints answering with a plain-text confirmation.
    pub(crate) async fn call_text(&self, request: impl IntoApiRequest) -> Result<String, ApiError> {
        let result = self.execute(request).await.map(ApiResponse::into_text);
        self.interceptor.intercept(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        testing::{RecordingNotifier, RecordingTransport},
        *,
    };
    use futures::executor::block_on;

    #[test]
    fn default_config_points_at_api_prefix_with_thirty_second_deadline() {
        let config = ApiConfig::default();
        assert_eq!("/api", config.base_url);
        assert_eq!(30_000, config.timeout_millis());
    }

    #[test]
    fn clients_compare_by_identity() {
        let transport = Rc::new(RecordingTransport::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let client = ApiClient::new(ApiConfig::default(), transport.clone(), notifier.clone());
        assert!(client == client.clone());
        let other = ApiClient::new(ApiConfig::default(), transport, notifier);
        assert!(client != other);
    }

    #[test]
    fn encode_failure_never_reaches_the_transport() {
        let (client, transport, notifier) = testing::client();

        let result = block_on(client.call_text(Err(ApiError::Encode("key must be a string".into()))));

        assert_eq!(Err(ApiError::Encode("key must be a string".into())), result);
        assert!(transport.requests().is_empty());
        assert_eq!(
            vec!["cannot encode request: key must be a string".to_string()],
            notifier.messages()
        );
    }

    #[test]
    fn transport_failure_is_notified_once() {
        let (client, transport, notifier) = testing::client();
        transport.fail_with(ApiError::Timeout(30_000));

        let result: Result<Vec<model::Repository>, _> =
            block_on(client.call_json(ApiRequest::get("/repositories")));

        assert_eq!(Err(ApiError::Timeout(30_000)), result);
        assert_eq!(
            vec!["timeout of 30000ms exceeded".to_string()],
            notifier.messages()
        );
    }

    #[test]
    fn undecodable_success_body_is_notified_once() {
        let (client, transport, notifier) = testing::client();
        transport.respond(200, "Repository cloned successfully");

        let result: Result<Vec<model::Repository>, _> =
            block_on(client.call_json(ApiRequest::get("/repositories")));

        assert_matches::assert_matches!(result, Err(ApiError::Decode(_)));
        let messages = notifier.messages();
        assert_eq!(1, messages.len(), "{messages:?}");
        assert!(
            messages[0].starts_with("cannot decode response: "),
            "{messages:?}"
        );
    }
}

//! In-memory transport and notifier for exercising the client.

use super::{ApiClient, ApiConfig, ApiError, ApiRequest, ApiResponse, Notifier, Transport};
use async_trait::async_trait;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// Records every request and replays queued responses in order.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingTransport {
    pub(crate) fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.into(),
        }));
    }

    pub(crate) fn respond_json(&self, body: &serde_json::Value) {
        self.respond(200, body.to_string());
    }

    pub(crate) fn fail_with(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// The only request sent so far.
    pub(crate) fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(1, requests.len(), "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        _config: &ApiConfig,
        request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("no response queued")
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

pub(crate) fn client() -> (ApiClient, Rc<RecordingTransport>, Rc<RecordingNotifier>) {
    let transport = Rc::new(RecordingTransport::default());
    let notifier = Rc::new(RecordingNotifier::default());
    let client = ApiClient::new(ApiConfig::default(), transport.clone(), notifier.clone());
    (client, transport, notifier)
}

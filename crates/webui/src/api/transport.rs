use super::{
    ApiConfig, ApiError,
    request::{ApiRequest, FormPart, Method, RequestBody},
};
use async_trait::async_trait;
use gloo::{net::http::RequestBuilder, timers::callback::Timeout};
use serde::de::DeserializeOwned;
use std::{cell::Cell, rc::Rc};
use wasm_bindgen::JsValue;
use web_sys::{AbortController, FormData};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`ApiError::Status`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub fn into_text(self) -> String {
        self.body
    }
}

/// Executes requests against the backend.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, config: &ApiConfig, request: ApiRequest)
    -> Result<ApiResponse, ApiError>;
}

/// Fetch API based transport used in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(
        &self,
        config: &ApiConfig,
        request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        let timeout_millis = config.timeout_millis();
        let controller = AbortController::new().map_err(js_error)?;
        let timed_out = Rc::new(Cell::new(false));
        // Aborts the fetch once the deadline passes, cancelled on drop.
        let _deadline = {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            Timeout::new(timer_delay(timeout_millis), move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let signal = controller.signal();
        let builder = RequestBuilder::new(&request.url(&config.base_url))
            .method(gloo_method(request.method))
            .abort_signal(Some(&signal));
        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.body(form_data(&parts)?),
        }
        .map_err(|err| ApiError::Encode(err.to_string()))?;

        let exchange = async {
            let response = prepared.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, gloo::net::Error>(ApiResponse { status, body })
        };
        exchange
            .await
            .map_err(|err| fetch_failure(&err, timed_out.get(), timeout_millis))
    }
}

/// Browsers fire `setTimeout` immediately for delays above `i32::MAX`.
fn timer_delay(timeout_millis: u64) -> u32 {
    const MAX_DELAY: u32 = i32::MAX.unsigned_abs();
    u32::try_from(timeout_millis).map_or(MAX_DELAY, |millis| millis.min(MAX_DELAY))
}

/// A fetch aborted by the deadline timer is a timeout, anything else a
/// network failure.
fn fetch_failure(err: &impl std::fmt::Display, timed_out: bool, timeout_millis: u64) -> ApiError {
    if timed_out {
        ApiError::Timeout(timeout_millis)
    } else {
        ApiError::Network(err.to_string())
    }
}

fn gloo_method(method: Method) -> gloo::net::http::Method {
    match method {
        Method::Get => gloo::net::http::Method::GET,
        Method::Post => gloo::net::http::Method::POST,
        Method::Put => gloo::net::http::Method::PUT,
        Method::Delete => gloo::net::http::Method::DELETE,
    }
}

/// Builds the browser form. The `Content-Type` header, including the
/// multipart boundary, is left for the browser to fill in.
pub fn form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        let appended = match part {
            FormPart::Text { name, value } => form.append_with_str(name, value),
            FormPart::File { name, file } => {
                let blob = gloo::file::Blob::new_with_options(
                    file.bytes.as_slice(),
                    file.mime_type.as_deref(),
                );
                form.append_with_blob_and_filename(
                    name,
                    &web_sys::Blob::from(blob),
                    &file.file_name,
                )
            }
        };
        appended.map_err(js_error)?;
    }
    Ok(form)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.error_for_status().is_ok());

        let not_found = ApiResponse {
            status: 404,
            body: "Repository not found".to_string(),
        };
        assert_eq!(
            Err(ApiError::Status {
                status: 404,
                body: "Repository not found".to_string()
            }),
            not_found.error_for_status()
        );
    }

    #[test]
    fn aborted_fetch_after_deadline_is_a_timeout() {
        assert_eq!(
            ApiError::Timeout(30_000),
            fetch_failure(&"The operation was aborted.", true, 30_000)
        );
        assert_eq!(
            "timeout of 30000ms exceeded",
            fetch_failure(&"The operation was aborted.", true, 30_000).to_string()
        );
    }

    #[test]
    fn fetch_failure_before_deadline_is_a_network_error() {
        assert_eq!(
            ApiError::Network("NetworkError when attempting to fetch resource.".to_string()),
            fetch_failure(
                &"NetworkError when attempting to fetch resource.",
                false,
                30_000
            )
        );
    }

    #[test]
    fn timer_delay_stays_within_browser_limit() {
        assert_eq!(30_000, timer_delay(30_000));
        assert_eq!(2_147_483_647, timer_delay(2_147_483_647));
        assert_eq!(2_147_483_647, timer_delay(2_147_483_648));
        assert_eq!(2_147_483_647, timer_delay(u64::from(u32::MAX)));
        assert_eq!(2_147_483_647, timer_delay(u64::MAX));
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let response = ApiResponse {
            status: 200,
            body: "Repository cloned successfully".to_string(),
        };
        assert_matches::assert_matches!(
            response.json::<Vec<serde_json::Value>>(),
            Err(ApiError::Decode(_))
        );
    }
}

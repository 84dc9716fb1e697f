//! Browser-only checks, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::time::Duration;
use testtools_webui::api::{
    ApiConfig, ApiError, ApiRequest, BrowserTransport, Transport, UploadFile,
    request::FormPart,
    transport::form_data,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn multipart_upload_carries_file_and_repository() {
    let parts = [
        FormPart::file(
            "file",
            UploadFile {
                file_name: "LoginTest.java".to_string(),
                mime_type: Some("text/x-java".to_string()),
                bytes: b"class LoginTest {}".to_vec(),
            },
        ),
        FormPart::text("repositoryId", 7),
    ];

    let form = form_data(&parts).unwrap();

    assert_eq!(Some("7".to_string()), form.get("repositoryId").as_string());
    let file: web_sys::File = form.get("file").dyn_into().unwrap();
    assert_eq!("LoginTest.java", file.name());
    assert_eq!("text/x-java", file.type_());
    assert!((file.size() - 18.0).abs() < f64::EPSILON);
}

#[wasm_bindgen_test]
fn empty_form_has_no_entries() {
    let form = form_data(&[]).unwrap();
    assert!(form.get("file").is_null());
}

#[wasm_bindgen_test]
async fn request_past_its_deadline_is_aborted_as_timeout() {
    let config = ApiConfig {
        // Non-routable address: the connection never completes.
        base_url: "http://10.255.255.1/api".to_string(),
        timeout: Duration::from_millis(1),
    };

    let result = BrowserTransport
        .send(&config, ApiRequest::get("/repositories"))
        .await;

    assert_eq!(Err(ApiError::Timeout(1)), result);
}

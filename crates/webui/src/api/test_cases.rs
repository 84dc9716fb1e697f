use super::{
    ApiClient, ApiError, ApiRequest, UploadFile,
    model::{RepositoryId, TestCase, TestCaseId},
    request::FormPart,
};

impl ApiClient {
    /// All test cases, or only those of one repository.
    pub async fn get_test_cases(
        &self,
        repository_id: Option<RepositoryId>,
    ) -> Result<Vec<TestCase>, ApiError> {
        self.call_json(ApiRequest::get("/testcases").query_opt("repositoryId", repository_id))
            .await
    }

    pub async fn get_test_case(&self, id: TestCaseId) -> Result<TestCase, ApiError> {
        self.call_json(ApiRequest::get(format!("/testcases/{id}")))
            .await
    }

    /// Uploads a `.java`, `.csv`, `.xmind`, `.xlsx` or `.xls` file to be parsed
    /// into test cases by the backend. Returns the backend's summary text.
    pub async fn upload_test_cases(
        &self,
        file: UploadFile,
        repository_id: RepositoryId,
    ) -> Result<String, ApiError> {
        self.call_text(ApiRequest::post("/testcases/upload").multipart(vec![
            FormPart::file("file", file),
            FormPart::text("repositoryId", repository_id),
        ]))
        .await
    }

    pub async fn create_test_case(&self, test_case: &TestCase) -> Result<TestCase, ApiError> {
        self.call_json(ApiRequest::post("/testcases").json(test_case))
            .await
    }

    pub async fn update_test_case(
        &self,
        id: TestCaseId,
        test_case: &TestCase,
    ) -> Result<TestCase, ApiError> {
        self.call_json(ApiRequest::put(format!("/testcases/{id}")).json(test_case))
            .await
    }

    pub async fn delete_test_case(&self, id: TestCaseId) -> Result<String, ApiError> {
        self.call_text(ApiRequest::delete(format!("/testcases/{id}")))
            .await
    }
}

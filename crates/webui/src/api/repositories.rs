use super::{
    ApiClient, ApiError, ApiRequest,
    model::{NewRepository, Repository, RepositoryId},
};

impl ApiClient {
    pub async fn get_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        self.call_json(ApiRequest::get("/repositories")).await
    }

    pub async fn get_repository(&self, id: RepositoryId) -> Result<Repository, ApiError> {
        self.call_json(ApiRequest::get(format!("/repositories/{id}")))
            .await
    }

    pub async fn create_repository(
        &self,
        repository: &NewRepository,
    ) -> Result<Repository, ApiError> {
        self.call_json(ApiRequest::post("/repositories").json(repository))
            .await
    }

    /// Clones the remote into the backend's workspace. Returns the backend's
    /// confirmation text.
    pub async fn clone_repository(&self, id: RepositoryId) -> Result<String, ApiError> {
        self.call_text(ApiRequest::post(format!("/repositories/{id}/clone")))
            .await
    }

    pub async fn pull_repository(&self, id: RepositoryId) -> Result<String, ApiError> {
        self.call_text(ApiRequest::post(format!("/repositories/{id}/pull")))
            .await
    }

    pub async fn delete_repository(&self, id: RepositoryId) -> Result<String, ApiError> {
        self.call_text(ApiRequest::delete(format!("/repositories/{id}")))
            .await
    }
}

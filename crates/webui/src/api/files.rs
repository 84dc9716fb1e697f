use super::{
    ApiClient, ApiError, ApiRequest,
    model::{DirectoryListing, FileContent, RepositoryId, RepositoryStats},
};

impl ApiClient {
    /// Lists one directory level. The root is addressed by an empty `path`.
    pub async fn browse_repository(
        &self,
        repository_id: RepositoryId,
        path: &str,
    ) -> Result<DirectoryListing, ApiError> {
        let path = Some(path).filter(|path| !path.is_empty());
        self.call_json(
            ApiRequest::get(format!("/files/browse/{repository_id}")).query_opt("path", path),
        )
        .await
    }

    pub async fn get_file_content(
        &self,
        repository_id: RepositoryId,
        file_path: &str,
    ) -> Result<FileContent, ApiError> {
        self.call_json(
            ApiRequest::get(format!("/files/content/{repository_id}"))
                .query("filePath", file_path),
        )
        .await
    }

    pub async fn get_repository_stats(
        &self,
        repository_id: RepositoryId,
    ) -> Result<RepositoryStats, ApiError> {
        self.call_json(ApiRequest::get(format!("/files/stats/{repository_id}")))
            .await
    }
}

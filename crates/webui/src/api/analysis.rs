use super::{
    ApiClient, ApiError, ApiRequest,
    model::{ChangeRange, CodeChange, RepositoryId, TestCaseRecommendation},
};

impl ApiClient {
    /// Diffs the commit range on the backend and returns the stored changes.
    pub async fn analyze_git_changes(
        &self,
        range: &ChangeRange,
    ) -> Result<Vec<CodeChange>, ApiError> {
        self.call_json(ApiRequest::post("/analysis/git-changes").json(range))
            .await
    }

    pub async fn recommend_test_cases(
        &self,
        range: &ChangeRange,
    ) -> Result<Vec<TestCaseRecommendation>, ApiError> {
        self.call_json(ApiRequest::post("/analysis/recommend-testcases").json(range))
            .await
    }

    /// Previously analyzed changes. An empty `commit_id` is the same as none.
    pub async fn get_code_changes(
        &self,
        repository_id: RepositoryId,
        commit_id: Option<&str>,
    ) -> Result<Vec<CodeChange>, ApiError> {
        let commit_id = commit_id.filter(|commit| !commit.is_empty());
        self.call_json(
            ApiRequest::get("/analysis/code-changes")
                .query("repositoryId", repository_id)
                .query_opt("commitId", commit_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{
        model::{ChangeRange, ImpactLevel},
        request::{Method, RequestBody},
        testing,
    };
    use futures::executor::block_on;
    use serde_json::json;

    fn range() -> ChangeRange {
        ChangeRange {
            repository_id: 2,
            from_commit: "a1b2c3".to_string(),
            to_commit: "HEAD".to_string(),
        }
    }

    #[test]
    fn analyze_posts_commit_range() {
        let (client, transport, _) = testing::client();
        transport.respond_json(&json!([{
            "id": 1, "repositoryId": 2, "commitId": "HEAD",
            "filePath": "src/main/java/com/example/UserService.java",
            "changeType": "MODIFY", "changedMethods": "save", "changedClasses": "UserService",
            "modulePath": "com.example", "linesAdded": 4, "linesDeleted": 1
        }]));

        let changes = block_on(client.analyze_git_changes(&range())).unwrap();

        let request = transport.single_request();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/analysis/git-changes", request.path);
        assert_eq!(
            RequestBody::Json(json!({
                "repositoryId": 2,
                "fromCommit": "a1b2c3",
                "toCommit": "HEAD"
            })),
            request.body
        );
        assert_eq!("MODIFY", changes[0].change_type);
        assert_eq!(Some(4), changes[0].lines_added);
    }

    #[test]
    fn recommend_posts_commit_range() {
        let (client, transport, _) = testing::client();
        transport.respond_json(&json!([{
            "testCase": {"id": 4, "repositoryId": 2, "caseName": "saves user"},
            "matchScore": 1.0,
            "matchReason": "class match: UserService",
            "impactLevel": "HIGH"
        }]));

        let recommendations = block_on(client.recommend_test_cases(&range())).unwrap();

        let request = transport.single_request();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/analysis/recommend-testcases", request.path);
        assert_eq!(
            RequestBody::Json(json!({
                "repositoryId": 2,
                "fromCommit": "a1b2c3",
                "toCommit": "HEAD"
            })),
            request.body
        );
        assert_eq!(Some(ImpactLevel::High), recommendations[0].impact_level);
    }

    #[test]
    fn code_changes_include_commit_only_when_non_empty() {
        let (client, transport, _) = testing::client();
        for _ in 0..3 {
            transport.respond_json(&json!([]));
        }

        block_on(client.get_code_changes(2, None)).unwrap();
        block_on(client.get_code_changes(2, Some(""))).unwrap();
        block_on(client.get_code_changes(2, Some("HEAD"))).unwrap();

        let queries: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|request| {
                assert_eq!(Method::Get, request.method);
                assert_eq!("/analysis/code-changes", request.path);
                request.query
            })
            .collect();
        assert_eq!(
            vec![
                vec![("repositoryId".to_string(), "2".to_string())],
                vec![("repositoryId".to_string(), "2".to_string())],
                vec![
                    ("repositoryId".to_string(), "2".to_string()),
                    ("commitId".to_string(), "HEAD".to_string())
                ],
            ],
            queries
        );
    }

    #[test]
    fn repository_not_ready_is_notified() {
        let (client, transport, notifier) = testing::client();
        transport.respond(400, "Repository is not ready for analysis");

        assert!(block_on(client.analyze_git_changes(&range())).is_err());
        assert_eq!(
            vec!["Repository is not ready for analysis".to_string()],
            notifier.messages()
        );
    }
}

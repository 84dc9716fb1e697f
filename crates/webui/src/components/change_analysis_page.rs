use crate::{
    api::model::{ChangeRange, CodeChange, RepositoryId},
    app::use_api,
    components::{
        code_change_table::CodeChangeTable,
        commit_range_form::CommitRangeForm,
        notification::{Notification, NotificationContext},
        revision::use_request_guard,
    },
};
use log::debug;
use std::ops::Deref;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Where the listed changes came from.
#[derive(Clone, Debug, PartialEq)]
enum ChangeSource {
    Analyzed(ChangeRange),
    /// Optionally filtered by commit.
    Stored(Option<String>),
}

impl ChangeSource {
    fn describe(&self) -> String {
        match self {
            ChangeSource::Analyzed(range) => {
                format!("Analyzed {}..{}", range.from_commit, range.to_commit)
            }
            ChangeSource::Stored(Some(commit_id)) => {
                format!("Stored changes of commit {commit_id}")
            }
            ChangeSource::Stored(None) => "All stored changes".to_string(),
        }
    }
}

#[function_component(ChangeAnalysisPage)]
pub fn change_analysis_page() -> Html {
    let api = use_api();
    let notifications =
        use_context::<NotificationContext>().expect("NotificationContext should be provided");
    let repository_state = use_state(|| None::<RepositoryId>);
    let busy_state = use_state(|| false);
    let changes_state = use_state(|| None::<(ChangeSource, Vec<CodeChange>)>);
    let commit_filter_ref = use_node_ref();
    let changes_guard = use_request_guard();

    let on_repository_change = {
        let repository_state = repository_state.clone();
        let changes_state = changes_state.clone();
        let busy_state = busy_state.clone();
        let changes_guard = changes_guard.clone();
        Callback::from(move |repository_id| {
            changes_guard.invalidate();
            repository_state.set(repository_id);
            changes_state.set(None);
            busy_state.set(false);
        })
    };

    let on_analyze = {
        let api = api.clone();
        let notifications = notifications.clone();
        let busy_state = busy_state.clone();
        let changes_state = changes_state.clone();
        let changes_guard = changes_guard.clone();
        Callback::from(move |range: ChangeRange| {
            let ticket = changes_guard.begin();
            let api = api.clone();
            let notifications = notifications.clone();
            let busy_state = busy_state.clone();
            let changes_state = changes_state.clone();
            busy_state.set(true);
            spawn_local(async move {
                let result = api.analyze_git_changes(&range).await;
                if !ticket.is_current() {
                    return;
                }
                busy_state.set(false);
                if let Ok(changes) = result {
                    debug!(
                        "Analysis of {}..{} found {} changes",
                        range.from_commit,
                        range.to_commit,
                        changes.len()
                    );
                    notifications.push(Notification::success(format!(
                        "Analysis finished: {} changed files",
                        changes.len()
                    )));
                    changes_state.set(Some((ChangeSource::Analyzed(range), changes)));
                }
            });
        })
    };

    let on_load_stored = {
        let api = api.clone();
        let repository_state = repository_state.clone();
        let busy_state = busy_state.clone();
        let changes_state = changes_state.clone();
        let commit_filter_ref = commit_filter_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(repository_id) = *repository_state else {
                return;
            };
            let ticket = changes_guard.begin();
            let commit_id = commit_filter_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value().trim().to_string())
                .filter(|commit| !commit.is_empty());
            let api = api.clone();
            let busy_state = busy_state.clone();
            let changes_state = changes_state.clone();
            busy_state.set(true);
            spawn_local(async move {
                let result = api
                    .get_code_changes(repository_id, commit_id.as_deref())
                    .await;
                if !ticket.is_current() {
                    return;
                }
                busy_state.set(false);
                if let Ok(changes) = result {
                    changes_state.set(Some((ChangeSource::Stored(commit_id), changes)));
                }
            });
        })
    };

    let results = match changes_state.deref() {
        None => html! {},
        Some((source, changes)) => html! {
            <section class="analysis-results">
                <h4>{ source.describe() }</h4>
                <CodeChangeTable changes={changes.clone()} />
            </section>
        },
    };

    html! {
        <>
            <h3>{"Change Analysis"}</h3>

            <CommitRangeForm
                onsubmit={on_analyze}
                submit_label="Analyze"
                busy={*busy_state}
                onrepositorychange={on_repository_change}
            />

            <div class="stored-changes">
                <input ref={commit_filter_ref} type="text" placeholder="Commit (optional)" />
                <button
                    onclick={on_load_stored}
                    disabled={*busy_state || repository_state.is_none()}
                >
                    {"Load stored changes"}
                </button>
            </div>

            { results }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_source_descriptions() {
        let analyzed = ChangeSource::Analyzed(ChangeRange {
            repository_id: 1,
            from_commit: "a1b2c3".to_string(),
            to_commit: "HEAD".to_string(),
        });
        assert_eq!("Analyzed a1b2c3..HEAD", analyzed.describe());

        let filtered = ChangeSource::Stored(Some("d4e5f6".to_string()));
        assert_eq!("Stored changes of commit d4e5f6", filtered.describe());

        assert_eq!("All stored changes", ChangeSource::Stored(None).describe());
    }
}

use crate::{
    api::model::{NewRepository, Repository, RepositoryId},
    app::use_api,
    components::{
        notification::{Notification, NotificationContext},
        revision::use_revision,
    },
    util::{format::short_commit, time::relative_to_now},
};
use log::debug;
use std::ops::Deref;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
enum RepositoryAction {
    Clone,
    Pull,
    Delete,
}

/// Reads a text input and returns its trimmed value, `None` when blank.
fn input_value(node_ref: &NodeRef) -> Option<String> {
    node_ref
        .cast::<HtmlInputElement>()
        .map(|input| input.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn clear_input(node_ref: &NodeRef) {
    if let Some(input) = node_ref.cast::<HtmlInputElement>() {
        input.set_value("");
    }
}

#[function_component(RepositoryManagementPage)]
pub fn repository_management_page() -> Html {
    let api = use_api();
    let notifications =
        use_context::<NotificationContext>().expect("NotificationContext should be provided");
    let repositories_state = use_state(|| None::<Vec<Repository>>);
    let pending_state = use_state(|| None::<RepositoryId>);
    let creating_state = use_state(|| false);
    let revision = use_revision();

    let name_ref = use_node_ref();
    let git_url_ref = use_node_ref();
    let branch_ref = use_node_ref();

    {
        let api = api.clone();
        let repositories_state = repositories_state.clone();
        use_effect_with(revision.0, move |_| {
            spawn_local(async move {
                if let Ok(repositories) = api.get_repositories().await {
                    repositories_state.set(Some(repositories));
                }
            });
        });
    }

    let on_create = {
        let api = api.clone();
        let notifications = notifications.clone();
        let creating_state = creating_state.clone();
        let revision = revision.clone();
        let (name_ref, git_url_ref, branch_ref) =
            (name_ref.clone(), git_url_ref.clone(), branch_ref.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let new_repository = NewRepository {
                name: input_value(&name_ref).unwrap_or_default(),
                git_url: input_value(&git_url_ref).unwrap_or_default(),
                branch: input_value(&branch_ref),
            };
            let api = api.clone();
            let notifications = notifications.clone();
            let creating_state = creating_state.clone();
            let revision = revision.clone();
            let refs = [name_ref.clone(), git_url_ref.clone(), branch_ref.clone()];
            creating_state.set(true);
            spawn_local(async move {
                let result = api.create_repository(&new_repository).await;
                creating_state.set(false);
                if let Ok(repository) = result {
                    debug!("Created repository {} with id {}", repository.name, repository.id);
                    notifications.push(Notification::success(format!(
                        "Repository {} created",
                        repository.name
                    )));
                    refs.iter().for_each(clear_input);
                    revision.dispatch(());
                }
            });
        })
    };

    let on_action = {
        let api = api.clone();
        let notifications = notifications.clone();
        let pending_state = pending_state.clone();
        let revision = revision.clone();
        Callback::from(move |(id, action): (RepositoryId, RepositoryAction)| {
            if action == RepositoryAction::Delete
                && !gloo::dialogs::confirm("Delete this repository?")
            {
                return;
            }
            let api = api.clone();
            let notifications = notifications.clone();
            let pending_state = pending_state.clone();
            let revision = revision.clone();
            pending_state.set(Some(id));
            spawn_local(async move {
                let result = match action {
                    RepositoryAction::Clone => api.clone_repository(id).await,
                    RepositoryAction::Pull => api.pull_repository(id).await,
                    RepositoryAction::Delete => api.delete_repository(id).await,
                };
                pending_state.set(None);
                if let Ok(message) = result {
                    debug!("{action} of repository {id}: {message}");
                    notifications.push(Notification::success(message));
                }
                // Failed clones and pulls change the status to ERROR.
                revision.dispatch(());
            });
        })
    };

    let on_refresh = {
        let revision = revision.clone();
        Callback::from(move |_| revision.dispatch(()))
    };

    let table = match repositories_state.deref() {
        None => html! { <p>{"Loading..."}</p> },
        Some(repositories) if repositories.is_empty() => {
            html! { <p class="empty">{"No repositories yet. Add one above."}</p> }
        }
        Some(repositories) => {
            let rows = repositories
                .iter()
                .map(|repository| {
                    render_row(repository, *pending_state.deref(), &on_action)
                })
                .collect::<Html>();
            html! {
                <table class="repository_list">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Git URL"}</th>
                            <th>{"Branch"}</th>
                            <th>{"Status"}</th>
                            <th>{"Last commit"}</th>
                            <th>{"Updated"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { rows }
                    </tbody>
                </table>
            }
        }
    };

    html! {
        <>
            <h3>{"Repositories"}</h3>

            <form class="repository-form" onsubmit={on_create}>
                <input ref={name_ref} type="text" placeholder="Name" required={true} />
                <input ref={git_url_ref} type="text" placeholder="Git URL" required={true} />
                <input ref={branch_ref} type="text" placeholder="Branch (main)" />
                <button type="submit" disabled={*creating_state}>
                    if *creating_state { {"Adding..."} } else { {"Add repository"} }
                </button>
            </form>

            <div class="repositories-filter">
                <button onclick={on_refresh}>{"Refresh"}</button>
            </div>

            { table }
        </>
    }
}

fn render_row(
    repository: &Repository,
    pending: Option<RepositoryId>,
    on_action: &Callback<(RepositoryId, RepositoryAction)>,
) -> Html {
    let id = repository.id;
    let is_pending = pending == Some(id);
    let disabled = pending.is_some() || repository.status.is_busy();
    let button = |action: RepositoryAction, label: &'static str, enabled: bool| {
        let on_action = on_action.clone();
        html! {
            <button
                class={classes!("action-button", format!("{}-button", action.to_string().to_lowercase()))}
                disabled={disabled || !enabled}
                onclick={move |_| on_action.emit((id, action))}
            >
                { label }
            </button>
        }
    };
    // Cloning again re-syncs the working copy, pulling needs one.
    let has_working_copy = repository.last_commit_id.is_some();

    html! {
        <tr key={id.to_string()}>
            <td>{ &repository.name }</td>
            <td class="git-url">{ &repository.git_url }</td>
            <td>{ repository.branch.as_deref().unwrap_or("main") }</td>
            <td>
                <span class={classes!("badge", repository.status.css_class())}>
                    { repository.status.to_string() }
                </span>
                if is_pending {
                    <span class="spinner">{" ⏳"}</span>
                }
            </td>
            <td class="commit">
                { repository.last_commit_id.as_deref().map(short_commit).unwrap_or("-") }
            </td>
            <td>{ repository.updated_time.map(relative_to_now).unwrap_or_default() }</td>
            <td class="actions">
                { button(RepositoryAction::Clone, "Clone", true) }
                { button(RepositoryAction::Pull, "Pull", has_working_copy) }
                { button(RepositoryAction::Delete, "Delete", true) }
            </td>
        </tr>
    }
}

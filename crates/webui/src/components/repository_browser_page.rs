use crate::{
    api::model::{FileContent, RepositoryId, RepositoryStats},
    app::use_api,
    components::{
        repository_select::RepositorySelect,
        revision::{use_request_guard, use_revision},
    },
    tree::{
        NodeId, Tree,
        file_tree::{self, FileNode},
    },
    util::format::{epoch_millis, human_size},
};
use log::{debug, trace};
use std::ops::Deref;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(RepositoryBrowserPage)]
pub fn repository_browser_page() -> Html {
    let api = use_api();
    let repository_state = use_state(|| None::<RepositoryId>);
    let tree_state = use_state(file_tree::new_file_tree);
    let stats_state = use_state(|| None::<RepositoryStats>);
    let content_state = use_state(|| None::<FileContent>);
    let loading_content_state = use_state(|| false);
    // The tree is mutated in place, this forces a re-render.
    let tree_revision = use_revision();
    // Responses for a repository or file that is no longer selected are dropped.
    let repository_guard = use_request_guard();
    let content_guard = use_request_guard();

    {
        let api = api.clone();
        let tree_state = tree_state.clone();
        let stats_state = stats_state.clone();
        let content_state = content_state.clone();
        let loading_content_state = loading_content_state.clone();
        let content_guard = content_guard.clone();
        let tree_revision = tree_revision.clone();
        use_effect_with(*repository_state, move |repository_id| {
            let repository_id = *repository_id;
            let ticket = repository_guard.begin();
            content_guard.invalidate();
            let tree = file_tree::new_file_tree();
            tree_state.set(tree.clone());
            stats_state.set(None);
            content_state.set(None);
            loading_content_state.set(false);
            if let Some(repository_id) = repository_id {
                let stats_api = api.clone();
                let stats_ticket = ticket.clone();
                spawn_local(async move {
                    let result = stats_api.get_repository_stats(repository_id).await;
                    if let Ok(stats) = result
                        && stats_ticket.is_current()
                    {
                        stats_state.set(Some(stats));
                    }
                });
                spawn_local(async move {
                    let result = api.browse_repository(repository_id, "").await;
                    if let Ok(listing) = result
                        && ticket.is_current()
                    {
                        debug!(
                            "Browsing {} with {} root entries",
                            listing.repository_name,
                            listing.items.len()
                        );
                        if let Some(root) = tree.root_id() {
                            tree.update(|tree| file_tree::insert_listing(tree, &root, &listing));
                        }
                        tree_revision.dispatch(());
                    }
                });
            }
        });
    }

    let on_repository_change = {
        let repository_state = repository_state.clone();
        Callback::from(move |repository_id| repository_state.set(repository_id))
    };

    let on_toggle = {
        let api = api.clone();
        let repository_state = repository_state.clone();
        let tree = tree_state.deref().clone();
        let tree_revision = tree_revision.clone();
        Callback::from(move |(node_id, expand): (NodeId, bool)| {
            let to_fetch = tree.update(|tree| file_tree::toggle(tree, &node_id, expand));
            tree_revision.dispatch(());
            let (Some(path), Some(repository_id)) = (to_fetch, *repository_state) else {
                return;
            };
            trace!("Fetching directory {path}");
            let api = api.clone();
            let tree = tree.clone();
            let tree_revision = tree_revision.clone();
            spawn_local(async move {
                let result = api.browse_repository(repository_id, &path).await;
                tree.update(|tree| match result {
                    Ok(listing) => file_tree::insert_listing(tree, &node_id, &listing),
                    Err(_) => {
                        // Collapse so that the next expansion retries.
                        file_tree::toggle(tree, &node_id, false);
                    }
                });
                tree_revision.dispatch(());
            });
        })
    };

    let on_select = {
        let api = api.clone();
        let repository_state = repository_state.clone();
        let tree = tree_state.deref().clone();
        let content_state = content_state.clone();
        let loading_content_state = loading_content_state.clone();
        let tree_revision = tree_revision.clone();
        Callback::from(move |node_id: NodeId| {
            let selected = tree.update(|tree| file_tree::select(tree, &node_id));
            tree_revision.dispatch(());
            let (Some(FileNode { path, is_directory: false, .. }), Some(repository_id)) =
                (selected, *repository_state)
            else {
                return;
            };
            let ticket = content_guard.begin();
            let api = api.clone();
            let content_state = content_state.clone();
            let loading_content_state = loading_content_state.clone();
            loading_content_state.set(true);
            spawn_local(async move {
                let result = api.get_file_content(repository_id, &path).await;
                if !ticket.is_current() {
                    trace!("Dropping stale content of {path}");
                    return;
                }
                loading_content_state.set(false);
                if let Ok(content) = result {
                    content_state.set(Some(content));
                }
            });
        })
    };

    let browser = if repository_state.is_some() {
        html! {
            <div class="browser-panes">
                <div class="browser-tree">
                    <Tree<FileNode>
                        tree={tree_state.deref().clone()}
                        revision={tree_revision.0}
                        onselect={on_select}
                        ontoggle={on_toggle}
                    />
                </div>
                <div class="browser-content">
                    { render_content(content_state.deref().as_ref(), *loading_content_state) }
                </div>
            </div>
        }
    } else {
        html! { <p class="hint">{"Select a repository to browse its files."}</p> }
    };

    html! {
        <>
            <h3>{"Repository Browser"}</h3>

            <div class="browser-filter">
                <RepositorySelect
                    selected={*repository_state}
                    onchange={on_repository_change}
                    only_ready={true}
                />
            </div>

            if let Some(stats) = stats_state.deref() {
                { render_stats(stats) }
            }

            { browser }
        </>
    }
}

fn render_stats(stats: &RepositoryStats) -> Html {
    let file_types = stats
        .sorted_file_types()
        .into_iter()
        .map(|(extension, count)| {
            html! {
                <li key={extension.to_string()}>
                    <code>{ extension }</code>{ format!(" {count}") }
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <section class="repository-stats">
            <dl>
                <dt>{"Files"}</dt>
                <dd>{ stats.total_files }</dd>
                <dt>{"Directories"}</dt>
                <dd>{ stats.total_directories }</dd>
                <dt>{"Code files"}</dt>
                <dd>{ stats.code_files }</dd>
                <dt>{"Size"}</dt>
                <dd>{ human_size(stats.total_size) }</dd>
            </dl>
            <ul class="file-types">{ file_types }</ul>
        </section>
    }
}

fn render_content(content: Option<&FileContent>, loading: bool) -> Html {
    if loading {
        return html! { <p>{"Loading..."}</p> };
    }
    let Some(content) = content else {
        return html! { <p class="hint">{"Select a file to show its content."}</p> };
    };
    html! {
        <article class="file-content">
            <header>
                <strong>{ &content.file_path }</strong>
                <span class="file-meta">
                    { format!(" {} | {}", human_size(content.size), epoch_millis(content.last_modified)) }
                </span>
            </header>
            <pre><code>{ &content.content }</code></pre>
        </article>
    }
}

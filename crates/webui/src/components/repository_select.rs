use crate::{
    api::model::{Repository, RepositoryId},
    app::use_api,
};
use log::debug;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Repositories known to the backend; `None` until the first response arrives.
#[hook]
pub fn use_repositories() -> UseStateHandle<Option<Rc<Vec<Repository>>>> {
    let api = use_api();
    let repositories = use_state(|| None);
    {
        let repositories = repositories.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                if let Ok(list) = api.get_repositories().await {
                    debug!("Loaded {} repositories", list.len());
                    repositories.set(Some(Rc::new(list)));
                }
            });
        });
    }
    repositories
}

#[derive(Properties, PartialEq)]
pub struct RepositorySelectProps {
    pub selected: Option<RepositoryId>,
    pub onchange: Callback<Option<RepositoryId>>,
    /// Offer an "all repositories" entry mapped to `None`.
    #[prop_or_default]
    pub allow_all: bool,
    /// List only repositories the backend can analyze or browse.
    #[prop_or_default]
    pub only_ready: bool,
}

#[function_component(RepositorySelect)]
pub fn repository_select(props: &RepositorySelectProps) -> Html {
    let repositories = use_repositories();

    let onchange = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            onchange.emit(select.value().parse().ok());
        })
    };

    let Some(repositories) = (*repositories).clone() else {
        return html! { <select disabled={true}><option>{"Loading repositories..."}</option></select> };
    };

    let placeholder = if props.allow_all {
        "All repositories"
    } else {
        "Select a repository"
    };
    let options = repositories
        .iter()
        .filter(|repository| !props.only_ready || repository.status.is_ready())
        .map(|repository| {
            html! {
                <option
                    key={repository.id.to_string()}
                    value={repository.id.to_string()}
                    selected={props.selected == Some(repository.id)}
                >
                    { format!("{} ({})", repository.name, repository.status) }
                </option>
            }
        })
        .collect::<Html>();

    html! {
        <select class="repository-select" {onchange}>
            <option value="" selected={props.selected.is_none()}>{ placeholder }</option>
            { options }
        </select>
    }
}

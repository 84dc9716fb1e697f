use crate::{
    api::model::{ChangeRange, RepositoryId},
    components::repository_select::RepositorySelect,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CommitRangeFormProps {
    pub onsubmit: Callback<ChangeRange>,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    /// Notified whenever the repository selection changes.
    #[prop_or_default]
    pub onrepositorychange: Option<Callback<Option<RepositoryId>>>,
}

/// Repository plus a `from..to` commit range. Both commits are required.
#[function_component(CommitRangeForm)]
pub fn commit_range_form(props: &CommitRangeFormProps) -> Html {
    let repository_state = use_state(|| None::<RepositoryId>);
    let from_ref = use_node_ref();
    let to_ref = use_node_ref();

    let on_repository_change = {
        let repository_state = repository_state.clone();
        let notify = props.onrepositorychange.clone();
        Callback::from(move |repository_id: Option<RepositoryId>| {
            repository_state.set(repository_id);
            if let Some(notify) = &notify {
                notify.emit(repository_id);
            }
        })
    };

    let onsubmit = {
        let repository_state = repository_state.clone();
        let (from_ref, to_ref) = (from_ref.clone(), to_ref.clone());
        let onsubmit = props.onsubmit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let commit = |node_ref: &NodeRef| {
                node_ref
                    .cast::<HtmlInputElement>()
                    .map(|input| input.value().trim().to_string())
                    .unwrap_or_default()
            };
            let (from_commit, to_commit) = (commit(&from_ref), commit(&to_ref));
            if let Some(repository_id) = *repository_state
                && !from_commit.is_empty()
                && !to_commit.is_empty()
            {
                onsubmit.emit(ChangeRange {
                    repository_id,
                    from_commit,
                    to_commit,
                });
            }
        })
    };

    html! {
        <form class="commit-range-form" {onsubmit}>
            <RepositorySelect
                selected={*repository_state}
                onchange={on_repository_change}
                only_ready={true}
            />
            <input ref={from_ref} type="text" placeholder="From commit" required={true} />
            <span class="range-separator">{".."}</span>
            <input ref={to_ref} type="text" placeholder="To commit (HEAD)" value="HEAD" required={true} />
            <button type="submit" disabled={props.busy || repository_state.is_none()}>
                if props.busy { {"Working..."} } else { { props.submit_label.clone() } }
            </button>
        </form>
    }
}

use crate::{
    api::{
        UploadFile,
        model::{RepositoryId, TestCase},
    },
    app::use_api,
    components::{
        notification::{Notification, NotificationContext},
        repository_select::RepositorySelect,
        revision::{use_request_guard, use_revision},
    },
    util::color::tag_color,
};
use log::{debug, error};
use std::ops::Deref;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const CASE_TYPES: [&str; 4] = ["UNIT_TEST", "INTEGRATION_TEST", "API_TEST", "E2E_TEST"];
const UPLOAD_ACCEPT: &str = ".java,.csv,.xmind,.xlsx,.xls";
const DEFAULT_PRIORITY: &str = "1";

fn text_of(node_ref: &NodeRef) -> Option<String> {
    let value = if let Some(input) = node_ref.cast::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = node_ref.cast::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = node_ref.cast::<HtmlSelectElement>() {
        select.value()
    } else {
        return None;
    };
    Some(value.trim().to_string()).filter(|value| !value.is_empty())
}

fn set_text(node_ref: &NodeRef, value: &str) {
    if let Some(input) = node_ref.cast::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = node_ref.cast::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = node_ref.cast::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

#[derive(Clone, Default)]
struct FormRefs {
    case_name: NodeRef,
    description: NodeRef,
    case_type: NodeRef,
    class_name: NodeRef,
    method_name: NodeRef,
    tags: NodeRef,
    covered_modules: NodeRef,
    priority: NodeRef,
}

impl FormRefs {
    fn read(&self, repository_id: RepositoryId) -> TestCase {
        TestCase {
            repository_id,
            case_name: text_of(&self.case_name).unwrap_or_default(),
            case_description: text_of(&self.description),
            case_type: text_of(&self.case_type),
            class_name: text_of(&self.class_name),
            method_name: text_of(&self.method_name),
            tags: text_of(&self.tags),
            covered_modules: text_of(&self.covered_modules),
            priority: text_of(&self.priority).and_then(|p| p.parse().ok()),
            ..TestCase::default()
        }
    }

    /// Every field with the value it takes on a fresh form.
    fn defaults(&self) -> [(&NodeRef, &'static str); 8] {
        [
            (&self.case_name, ""),
            (&self.description, ""),
            (&self.case_type, CASE_TYPES[0]),
            (&self.class_name, ""),
            (&self.method_name, ""),
            (&self.tags, ""),
            (&self.covered_modules, ""),
            (&self.priority, DEFAULT_PRIORITY),
        ]
    }

    fn reset(&self) {
        for (node_ref, value) in self.defaults() {
            set_text(node_ref, value);
        }
    }
}

#[function_component(TestCaseManagementPage)]
pub fn test_case_management_page() -> Html {
    let api = use_api();
    let notifications =
        use_context::<NotificationContext>().expect("NotificationContext should be provided");
    let repository_state = use_state(|| None::<RepositoryId>);
    let test_cases_state = use_state(|| None::<Vec<TestCase>>);
    let uploading_state = use_state(|| false);
    let revision = use_revision();
    let form = use_memo((), |()| FormRefs::default());
    let file_ref = use_node_ref();
    let load_guard = use_request_guard();

    {
        let api = api.clone();
        let test_cases_state = test_cases_state.clone();
        use_effect_with(
            (*repository_state, revision.0),
            move |(repository_id, _)| {
                let repository_id = *repository_id;
                let ticket = load_guard.begin();
                test_cases_state.set(None);
                spawn_local(async move {
                    let result = api.get_test_cases(repository_id).await;
                    if let Ok(test_cases) = result
                        && ticket.is_current()
                    {
                        test_cases_state.set(Some(test_cases));
                    }
                });
            },
        );
    }

    let on_repository_change = {
        let repository_state = repository_state.clone();
        Callback::from(move |repository_id| repository_state.set(repository_id))
    };

    let on_create = {
        let api = api.clone();
        let notifications = notifications.clone();
        let repository_state = repository_state.clone();
        let revision = revision.clone();
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(repository_id) = *repository_state else {
                return;
            };
            let test_case = form.read(repository_id);
            let api = api.clone();
            let notifications = notifications.clone();
            let revision = revision.clone();
            let form = form.clone();
            spawn_local(async move {
                if let Ok(created) = api.create_test_case(&test_case).await {
                    debug!("Created test case {:?}", created.id);
                    notifications.push(Notification::success(format!(
                        "Test case {} created",
                        created.case_name
                    )));
                    form.reset();
                    revision.dispatch(());
                }
            });
        })
    };

    let on_upload = {
        let api = api.clone();
        let notifications = notifications.clone();
        let repository_state = repository_state.clone();
        let uploading_state = uploading_state.clone();
        let revision = revision.clone();
        let file_ref = file_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(repository_id) = *repository_state else {
                return;
            };
            let Some(input) = file_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                notifications.push(Notification::info("Choose a file to upload"));
                return;
            };
            let file = gloo::file::File::from(file);
            let api = api.clone();
            let notifications = notifications.clone();
            let uploading_state = uploading_state.clone();
            let revision = revision.clone();
            uploading_state.set(true);
            spawn_local(async move {
                match gloo::file::futures::read_as_bytes(&file).await {
                    Ok(bytes) => {
                        let upload = UploadFile {
                            file_name: file.name(),
                            mime_type: Some(file.raw_mime_type()).filter(|m| !m.is_empty()),
                            bytes,
                        };
                        if let Ok(summary) = api.upload_test_cases(upload, repository_id).await {
                            notifications.push(Notification::success(summary));
                            input.set_value("");
                            revision.dispatch(());
                        }
                    }
                    Err(err) => {
                        error!("Cannot read {}: {err:?}", file.name());
                        notifications.push(Notification::error(format!(
                            "Cannot read {}",
                            file.name()
                        )));
                    }
                }
                uploading_state.set(false);
            });
        })
    };

    let on_priority_change = {
        let api = api.clone();
        let revision = revision.clone();
        Callback::from(move |(test_case, priority): (TestCase, i32)| {
            let Some(id) = test_case.id else {
                return;
            };
            let api = api.clone();
            let revision = revision.clone();
            let updated = TestCase {
                priority: Some(priority),
                ..test_case
            };
            spawn_local(async move {
                if api.update_test_case(id, &updated).await.is_ok() {
                    debug!("Priority of test case {id} set to {priority}");
                }
                revision.dispatch(());
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        let notifications = notifications.clone();
        let revision = revision.clone();
        Callback::from(move |test_case: TestCase| {
            let Some(id) = test_case.id else {
                return;
            };
            if !gloo::dialogs::confirm(&format!("Delete test case {}?", test_case.case_name)) {
                return;
            }
            let api = api.clone();
            let notifications = notifications.clone();
            let revision = revision.clone();
            spawn_local(async move {
                if let Ok(message) = api.delete_test_case(id).await {
                    notifications.push(Notification::success(message));
                    revision.dispatch(());
                }
            });
        })
    };

    let has_repository = repository_state.is_some();
    let table = match test_cases_state.deref() {
        None => html! { <p>{"Loading..."}</p> },
        Some(test_cases) if test_cases.is_empty() => {
            html! { <p class="empty">{"No test cases."}</p> }
        }
        Some(test_cases) => html! {
            <table class="test_case_list">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Method"}</th>
                        <th>{"Type"}</th>
                        <th>{"Modules"}</th>
                        <th>{"Tags"}</th>
                        <th class="number">{"Priority"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for test_cases.iter().map(|test_case| render_row(test_case, &on_priority_change, &on_delete)) }
                </tbody>
            </table>
        },
    };

    html! {
        <>
            <h3>{"Test Cases"}</h3>

            <div class="test-cases-filter">
                <RepositorySelect
                    selected={*repository_state}
                    onchange={on_repository_change}
                    allow_all={true}
                />
            </div>

            if has_repository {
                <>
                <div class="upload-form">
                    <input ref={file_ref} type="file" accept={UPLOAD_ACCEPT} />
                    <button onclick={on_upload} disabled={*uploading_state}>
                        if *uploading_state { {"Uploading..."} } else { {"Upload test cases"} }
                    </button>
                </div>

                <form class="test-case-form" onsubmit={on_create}>
                    <input ref={form.case_name.clone()} type="text" placeholder="Case name" required={true} />
                    <select ref={form.case_type.clone()}>
                        { for CASE_TYPES.iter().map(|case_type| html! { <option value={*case_type}>{ *case_type }</option> }) }
                    </select>
                    <input ref={form.class_name.clone()} type="text" placeholder="Class" />
                    <input ref={form.method_name.clone()} type="text" placeholder="Method" />
                    <input ref={form.covered_modules.clone()} type="text" placeholder="Covered modules (comma separated)" />
                    <input ref={form.tags.clone()} type="text" placeholder="Tags (comma separated)" />
                    <input ref={form.priority.clone()} type="number" min="1" value={DEFAULT_PRIORITY} />
                    <textarea ref={form.description.clone()} placeholder="Description" />
                    <button type="submit">{"Add test case"}</button>
                </form>
                </>
            } else {
                <p class="hint">{"Select a repository to upload or add test cases."}</p>
            }

            { table }
        </>
    }
}

fn render_row(
    test_case: &TestCase,
    on_priority_change: &Callback<(TestCase, i32)>,
    on_delete: &Callback<TestCase>,
) -> Html {
    let onchange = {
        let on_priority_change = on_priority_change.clone();
        let test_case = test_case.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(priority) = input.value().parse() {
                on_priority_change.emit((test_case.clone(), priority));
            }
        })
    };
    let ondelete = {
        let on_delete = on_delete.clone();
        let test_case = test_case.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(test_case.clone()))
    };
    let tags = test_case
        .tag_list()
        .into_iter()
        .map(|tag| {
            html! {
                <span class="tag" style={format!("background-color: {}", tag_color(tag))}>{ tag }</span>
            }
        })
        .collect::<Html>();

    html! {
        <tr key={test_case.id.map(|id| id.to_string()).unwrap_or_default()}>
            <td title={test_case.case_description.clone().unwrap_or_default()}>
                { &test_case.case_name }
            </td>
            <td class="method">{ test_case.qualified_method().unwrap_or_default() }</td>
            <td>{ test_case.case_type.clone().unwrap_or_default() }</td>
            <td>{ test_case.covered_modules.clone().unwrap_or_default() }</td>
            <td>{ tags }</td>
            <td class="number">
                <input
                    type="number"
                    min="1"
                    value={test_case.priority.unwrap_or(1).to_string()}
                    {onchange}
                />
            </td>
            <td><button class="action-button delete-button" onclick={ondelete}>{"Delete"}</button></td>
        </tr>
    }
}

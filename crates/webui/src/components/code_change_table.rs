use crate::{api::model::CodeChange, util::format::short_commit};
use yew::prelude::*;

/// Lines added and deleted over all changes.
fn line_totals(changes: &[CodeChange]) -> (i64, i64) {
    changes.iter().fold((0_i64, 0_i64), |(added, deleted), change| {
        (
            added.saturating_add(i64::from(change.lines_added.unwrap_or_default())),
            deleted.saturating_add(i64::from(change.lines_deleted.unwrap_or_default())),
        )
    })
}

#[derive(Properties, PartialEq)]
pub struct CodeChangeTableProps {
    pub changes: Vec<CodeChange>,
}

#[function_component(CodeChangeTable)]
pub fn code_change_table(CodeChangeTableProps { changes }: &CodeChangeTableProps) -> Html {
    if changes.is_empty() {
        return html! { <p class="empty">{"No code changes."}</p> };
    }
    let (added, deleted) = line_totals(changes);

    html! {
        <>
            <p class="summary">
                { format!("{} files changed, ", changes.len()) }
                <span class="lines-added">{ format!("+{added}") }</span>
                {" "}
                <span class="lines-deleted">{ format!("-{deleted}") }</span>
            </p>
            <table class="code_change_list">
                <thead>
                    <tr>
                        <th>{"Commit"}</th>
                        <th>{"File"}</th>
                        <th>{"Change"}</th>
                        <th>{"Classes"}</th>
                        <th>{"Methods"}</th>
                        <th>{"Module"}</th>
                        <th class="number">{"Lines"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for changes.iter().enumerate().map(|(idx, change)| render_row(idx, change)) }
                </tbody>
            </table>
        </>
    }
}

fn render_row(idx: usize, change: &CodeChange) -> Html {
    let key = change
        .id
        .map_or_else(|| format!("{idx}-{}", change.file_path), |id| id.to_string());
    let methods = change
        .method_list()
        .into_iter()
        .map(|method| html! { <code class="method">{ method }</code> })
        .collect::<Html>();

    html! {
        <tr {key}>
            <td class="commit">{ short_commit(&change.commit_id) }</td>
            <td class="file-path">{ &change.file_path }</td>
            <td>
                <span class={classes!("badge", format!("change-{}", change.change_type.to_lowercase()))}>
                    { &change.change_type }
                </span>
            </td>
            <td>{ change.class_list().join(", ") }</td>
            <td>{ methods }</td>
            <td>{ change.module_path.clone().unwrap_or_default() }</td>
            <td class="number">
                <span class="lines-added">{ format!("+{}", change.lines_added.unwrap_or_default()) }</span>
                {" "}
                <span class="lines-deleted">{ format!("-{}", change.lines_deleted.unwrap_or_default()) }</span>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(lines_added: Option<i32>, lines_deleted: Option<i32>) -> CodeChange {
        CodeChange {
            lines_added,
            lines_deleted,
            ..CodeChange::default()
        }
    }

    #[test]
    fn line_totals_skip_missing_counts() {
        let changes = [change(Some(12), Some(3)), change(None, Some(4)), change(Some(1), None)];
        assert_eq!((13, 7), line_totals(&changes));
    }

    #[test]
    fn line_totals_do_not_overflow_i32() {
        let changes = [
            change(Some(i32::MAX), Some(i32::MAX)),
            change(Some(i32::MAX), Some(1)),
        ];
        assert_eq!(
            (2 * i64::from(i32::MAX), i64::from(i32::MAX) + 1),
            line_totals(&changes)
        );
    }
}

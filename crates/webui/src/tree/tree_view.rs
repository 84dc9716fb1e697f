//! Renders a [`TreeData`] as nested lists.

use super::{NodeData, TreeData};
use id_tree::NodeId;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TreeProps<T: Clone + PartialEq + 'static> {
    pub tree: TreeData<T>,
    /// The tree is mutated in place; bump this to re-render it.
    #[prop_or_default]
    pub revision: u64,
    /// Clicking the label of a node.
    #[prop_or_default]
    pub onselect: Option<Callback<NodeId>>,
    /// Clicking the caret; carries the requested expansion state.
    #[prop_or_default]
    pub ontoggle: Option<Callback<(NodeId, bool)>>,
}

#[function_component(Tree)]
pub fn tree<T: Clone + PartialEq + 'static>(props: &TreeProps<T>) -> Html {
    let tree = props.tree.borrow();

    let Some(root_id) = tree.root_node_id() else {
        return html! { <div class="tree-empty">{"Empty tree"}</div> };
    };

    // The root itself is not rendered.
    html! {
        <ul class="tree-root">
            { for tree.children_ids(root_id).expect("root should exist").map(|child_id| render_node(&tree, child_id, props)) }
        </ul>
    }
}

fn render_node<T: Clone + PartialEq + 'static>(
    tree: &id_tree::Tree<NodeData<T>>,
    node_id: &NodeId,
    props: &TreeProps<T>,
) -> Html {
    let data = tree.get(node_id).expect("node should exist").data();

    let has_children = tree
        .children_ids(node_id)
        .is_ok_and(|mut children| children.next().is_some());
    let show_caret = data.has_caret || has_children;
    let is_expanded = data.is_expanded;

    let on_caret = {
        let node_id = node_id.clone();
        let ontoggle = props.ontoggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if let Some(cb) = &ontoggle {
                cb.emit((node_id.clone(), !is_expanded));
            }
        })
    };
    let on_label = {
        let node_id = node_id.clone();
        let onselect = props.onselect.clone();
        let ontoggle = props.ontoggle.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(cb) = &onselect {
                cb.emit(node_id.clone());
            }
            // Clicking a folder label also toggles it.
            if show_caret && let Some(cb) = &ontoggle {
                cb.emit((node_id.clone(), !is_expanded));
            }
        })
    };

    let node_classes = classes!(
        "tree-node",
        data.is_selected.then_some("tree-node-selected"),
        is_expanded.then_some("tree-node-expanded"),
    );

    html! {
        <li class={node_classes}>
            <div class="tree-node-content">
                if show_caret {
                    <span
                        class={classes!("tree-caret", if is_expanded { "tree-caret-open" } else { "tree-caret-closed" })}
                        onclick={on_caret}
                    >
                        { if is_expanded { "▼" } else { "▶" } }
                    </span>
                } else {
                    <span class="tree-caret tree-caret-none">{"\u{00a0}\u{00a0}"}</span>
                }
                { data.icon.to_html() }
                <span class="tree-label" onclick={on_label}>{ data.label.clone() }</span>
            </div>
            if is_expanded && has_children {
                <ul class="tree-children">
                    { for tree.children_ids(node_id).expect("node exists").map(|child_id| {
                        render_node(tree, child_id, props)
                    })}
                </ul>
            }
        </li>
    }
}

//! Node payload and the shared tree handle rendered by [`super::Tree`].

use super::{Icon, Node, NodeId, TreeBuilder};
use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};
use yew::Html;

/// What the tree view needs to know about a node, plus the caller's `data`.
#[derive(Clone)]
pub struct NodeData<T: Clone> {
    pub icon: Icon,
    /// Rendered next to the icon; clicking it selects the node.
    pub label: Html,
    /// Shows a caret even before any child is known, e.g. for a directory
    /// whose content has not been fetched yet.
    pub has_caret: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub data: T,
}

impl<T: Clone + Default> Default for NodeData<T> {
    fn default() -> Self {
        Self {
            icon: Icon::default(),
            label: Html::default(),
            has_caret: false,
            is_expanded: false,
            is_selected: false,
            data: T::default(),
        }
    }
}

impl<T: Clone + PartialEq> PartialEq for NodeData<T> {
    fn eq(&self, other: &Self) -> bool {
        // `label` is rendered from `data`.
        self.icon == other.icon
            && self.has_caret == other.has_caret
            && self.is_expanded == other.is_expanded
            && self.is_selected == other.is_selected
            && self.data == other.data
    }
}

/// Shared handle to an `id_tree::Tree`.
///
/// Clones point at the same tree, so a callback may mutate the tree that a
/// [`super::Tree`] component renders. Equality is identity: replacing the
/// handle re-renders, mutating through it does not.
#[derive(Clone)]
pub struct TreeData<T: Clone>(Rc<RefCell<id_tree::Tree<NodeData<T>>>>);

impl<T: Clone> TreeData<T> {
    /// A tree holding only `root`.
    pub fn with_root(root: NodeData<T>) -> Self {
        Self::from(TreeBuilder::new().with_root(Node::new(root)).build())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.0.borrow().root_node_id().cloned()
    }

    /// Runs `f` with exclusive access. Must not be called while a borrow
    /// obtained from [`Self::borrow`] is alive.
    pub fn update<R>(&self, f: impl FnOnce(&mut id_tree::Tree<NodeData<T>>) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn borrow(&self) -> Ref<'_, id_tree::Tree<NodeData<T>>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, id_tree::Tree<NodeData<T>>> {
        self.0.borrow_mut()
    }
}

impl<T: Clone> From<id_tree::Tree<NodeData<T>>> for TreeData<T> {
    fn from(tree: id_tree::Tree<NodeData<T>>) -> Self {
        Self(Rc::new(RefCell::new(tree)))
    }
}

impl<T: Clone> PartialEq for TreeData<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::InsertBehavior;

    fn labelled(data: &str) -> NodeData<String> {
        NodeData {
            data: data.to_string(),
            ..NodeData::default()
        }
    }

    #[test]
    fn clones_share_one_tree() {
        let tree = TreeData::with_root(labelled("root"));
        let handle = tree.clone();
        let root = tree.root_id().unwrap();

        handle.update(|tree| {
            tree.insert(Node::new(labelled("child")), InsertBehavior::UnderNode(&root))
                .unwrap();
        });

        assert_eq!(1, tree.borrow().children(&root).unwrap().count());
        assert!(tree == handle);
    }

    #[test]
    fn separate_trees_differ_even_with_equal_content() {
        let first = TreeData::with_root(labelled("root"));
        let second = TreeData::with_root(labelled("root"));
        assert!(first != second);
        let (first_tree, second_tree) = (first.borrow(), second.borrow());
        assert!(
            first_tree.get(&first.root_id().unwrap()).unwrap().data()
                == second_tree.get(&second.root_id().unwrap()).unwrap().data()
        );
    }

    #[test]
    fn node_equality_ignores_the_label() {
        let plain = labelled("src");
        let decorated = NodeData {
            label: yew::html! { <b>{"src"}</b> },
            ..plain.clone()
        };
        assert!(plain == decorated);
        assert!(
            plain
                != NodeData {
                    is_expanded: true,
                    ..plain.clone()
                }
        );
    }
}

//! Lazily loaded directory tree of a repository.
//!
//! Directories start collapsed and without children; their content is
//! fetched on first expansion and spliced in with [`insert_listing`].

use super::{Icon, InsertBehavior, Node, NodeData, NodeId, TreeData};
use crate::api::model::{DirectoryListing, FileEntry};
use yew::html;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FileNode {
    /// Relative to the repository root; empty for the root.
    pub path: String,
    pub is_directory: bool,
    /// Children were fetched from the backend.
    pub loaded: bool,
}

pub type FileTree = id_tree::Tree<NodeData<FileNode>>;

/// A tree holding only the (invisible) repository root.
pub fn new_file_tree() -> TreeData<FileNode> {
    TreeData::with_root(NodeData {
        data: FileNode {
            is_directory: true,
            ..FileNode::default()
        },
        ..NodeData::default()
    })
}

fn node_for(entry: &FileEntry) -> NodeData<FileNode> {
    let icon = if entry.is_directory() {
        Icon::FolderClose
    } else if entry.is_code_file.unwrap_or_default() {
        Icon::CodeFile
    } else {
        Icon::Document
    };
    NodeData {
        icon,
        label: html! { <span title={entry.path.clone()}>{ &entry.name }</span> },
        has_caret: entry.is_directory(),
        is_expanded: false,
        is_selected: false,
        data: FileNode {
            path: entry.path.clone(),
            is_directory: entry.is_directory(),
            loaded: false,
        },
    }
}

/// Replaces the children of `parent` with the entries of `listing`, skipping
/// the `..` link, and marks `parent` as loaded.
pub fn insert_listing(tree: &mut FileTree, parent: &NodeId, listing: &DirectoryListing) {
    let existing: Vec<NodeId> = tree
        .children_ids(parent)
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default();
    for child in existing {
        let _ = tree.remove_node(child, id_tree::RemoveBehavior::DropChildren);
    }

    for entry in listing.items.iter().filter(|entry| !entry.is_parent_link()) {
        let _ = tree.insert(Node::new(node_for(entry)), InsertBehavior::UnderNode(parent));
    }

    if let Ok(node) = tree.get_mut(parent) {
        let data = node.data_mut();
        data.data.loaded = true;
        data.icon = if data.is_expanded {
            Icon::FolderOpen
        } else {
            Icon::FolderClose
        };
    }
}

/// Expands or collapses a directory. Returns the path to fetch when the
/// directory is expanded for the first time.
pub fn toggle(tree: &mut FileTree, node_id: &NodeId, expand: bool) -> Option<String> {
    let node = tree.get_mut(node_id).ok()?;
    let data = node.data_mut();
    if !data.data.is_directory {
        return None;
    }
    data.is_expanded = expand;
    data.icon = match (expand, data.data.loaded) {
        (true, false) => Icon::Loading,
        (true, true) => Icon::FolderOpen,
        (false, _) => Icon::FolderClose,
    };
    (expand && !data.data.loaded).then(|| data.data.path.clone())
}

/// Marks `node_id` as the only selected node and returns its data.
pub fn select(tree: &mut FileTree, node_id: &NodeId) -> Option<FileNode> {
    let ids: Vec<NodeId> = tree
        .root_node_id()
        .and_then(|root| tree.traverse_pre_order_ids(root).ok())
        .map(Iterator::collect)
        .unwrap_or_default();
    for id in ids {
        if let Ok(node) = tree.get_mut(&id) {
            node.data_mut().is_selected = &id == node_id;
        }
    }
    tree.get(node_id).ok().map(|node| node.data().data.clone())
}

/// Finds the node of a directory by its path.
pub fn find_by_path(tree: &FileTree, path: &str) -> Option<NodeId> {
    let root = tree.root_node_id()?;
    tree.traverse_pre_order_ids(root)
        .ok()?
        .find(|id| tree.get(id).is_ok_and(|node| node.data().data.path == path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::FileKind;

    fn entry(name: &str, path: &str, kind: FileKind, code: Option<bool>) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            kind,
            path: path.to_string(),
            size: 0,
            last_modified: 0,
            extension: None,
            is_code_file: code,
        }
    }

    fn listing(current_path: &str, items: Vec<FileEntry>) -> DirectoryListing {
        DirectoryListing {
            current_path: current_path.to_string(),
            repository_name: "demo".to_string(),
            items,
        }
    }

    fn child_paths(tree: &FileTree, parent: &NodeId) -> Vec<String> {
        tree.children(parent)
            .unwrap()
            .map(|node| node.data().data.path.clone())
            .collect()
    }

    #[test]
    fn root_listing_populates_top_level() {
        let data = new_file_tree();
        let mut tree = data.borrow_mut();
        let root = tree.root_node_id().unwrap().clone();

        insert_listing(
            &mut tree,
            &root,
            &listing(
                "",
                vec![
                    entry("src", "src", FileKind::Directory, None),
                    entry("pom.xml", "pom.xml", FileKind::File, Some(false)),
                ],
            ),
        );

        assert_eq!(vec!["src", "pom.xml"], child_paths(&tree, &root));
        assert!(tree.get(&root).unwrap().data().data.loaded);
        let src = find_by_path(&tree, "src").unwrap();
        let src_node = tree.get(&src).unwrap().data();
        assert!(src_node.has_caret);
        assert_eq!(Icon::FolderClose, src_node.icon);
        assert!(!src_node.data.loaded);
    }

    #[test]
    fn first_expansion_requests_listing_and_drops_parent_link() {
        let data = new_file_tree();
        let mut tree = data.borrow_mut();
        let root = tree.root_node_id().unwrap().clone();
        insert_listing(
            &mut tree,
            &root,
            &listing("", vec![entry("src", "src", FileKind::Directory, None)]),
        );
        let src = find_by_path(&tree, "src").unwrap();

        assert_eq!(Some("src".to_string()), toggle(&mut tree, &src, true));
        assert_eq!(Icon::Loading, tree.get(&src).unwrap().data().icon);

        insert_listing(
            &mut tree,
            &src,
            &listing(
                "src",
                vec![
                    entry("..", "", FileKind::Directory, None),
                    entry("Main.java", "src/Main.java", FileKind::File, Some(true)),
                ],
            ),
        );
        assert_eq!(vec!["src/Main.java"], child_paths(&tree, &src));
        assert_eq!(Icon::FolderOpen, tree.get(&src).unwrap().data().icon);
        let main = find_by_path(&tree, "src/Main.java").unwrap();
        assert_eq!(Icon::CodeFile, tree.get(&main).unwrap().data().icon);

        // Already loaded: collapsing and expanding again needs no fetch.
        assert_eq!(None, toggle(&mut tree, &src, false));
        assert_eq!(None, toggle(&mut tree, &src, true));
    }

    #[test]
    fn files_cannot_be_toggled_and_selection_is_exclusive() {
        let data = new_file_tree();
        let mut tree = data.borrow_mut();
        let root = tree.root_node_id().unwrap().clone();
        insert_listing(
            &mut tree,
            &root,
            &listing(
                "",
                vec![
                    entry("README.md", "README.md", FileKind::File, Some(false)),
                    entry("App.java", "App.java", FileKind::File, Some(true)),
                ],
            ),
        );
        let readme = find_by_path(&tree, "README.md").unwrap();
        let app = find_by_path(&tree, "App.java").unwrap();

        assert_eq!(None, toggle(&mut tree, &readme, true));
        assert!(!tree.get(&readme).unwrap().data().is_expanded);

        select(&mut tree, &readme);
        let selected = select(&mut tree, &app).unwrap();
        assert_eq!("App.java", selected.path);
        assert!(!tree.get(&readme).unwrap().data().is_selected);
        assert!(tree.get(&app).unwrap().data().is_selected);
    }

    #[test]
    fn reloading_a_directory_replaces_its_children() {
        let data = new_file_tree();
        let mut tree = data.borrow_mut();
        let root = tree.root_node_id().unwrap().clone();
        insert_listing(
            &mut tree,
            &root,
            &listing("", vec![entry("old.txt", "old.txt", FileKind::File, None)]),
        );
        insert_listing(
            &mut tree,
            &root,
            &listing("", vec![entry("new.txt", "new.txt", FileKind::File, None)]),
        );
        assert_eq!(vec!["new.txt"], child_paths(&tree, &root));
    }
}

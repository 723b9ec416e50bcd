//! File tree data model for the explorer sidebar.
//!
//! Nodes live in a slotmap arena; directory children are loaded lazily
//! on first expansion.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: OsString,
    parent: Option<NodeId>,
    children: Option<BTreeMap<OsString, NodeId>>,
    load_state: LoadState,
}

impl Node {
    fn new_file(name: OsString, parent: Option<NodeId>) -> Self {
        Self {
            kind: NodeKind::File,
            name,
            parent,
            children: None,
            load_state: LoadState::Loaded,
        }
    }

    fn new_dir(name: OsString, parent: Option<NodeId>, load_state: LoadState) -> Self {
        Self {
            kind: NodeKind::Dir,
            name,
            parent,
            children: Some(BTreeMap::new()),
            load_state,
        }
    }
}

pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    expanded: FxHashSet<NodeId>,
    selected: Option<NodeId>,
    absolute_root: PathBuf,
}

impl FileTree {
    fn new_with_root(root_name: OsString, absolute_root: PathBuf) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new_dir(root_name, None, LoadState::Loaded));

        let mut expanded = FxHashSet::default();
        expanded.insert(root);

        Self {
            arena,
            root,
            expanded,
            selected: None,
            absolute_root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn absolute_root(&self) -> &Path {
        &self.absolute_root
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|n| n.kind == NodeKind::Dir)
            .unwrap_or(false)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.arena.get(id).is_some_and(|n| n.kind == NodeKind::Dir) {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    fn insert_child(&mut self, parent: NodeId, name: OsString, kind: NodeKind) -> Option<NodeId> {
        let node = match kind {
            NodeKind::File => Node::new_file(name.clone(), Some(parent)),
            NodeKind::Dir => Node::new_dir(name.clone(), Some(parent), LoadState::NotLoaded),
        };
        let id = self.arena.insert(node);
        let children = self.arena.get_mut(parent)?.children.as_mut()?;
        children.insert(name, id);
        Some(id)
    }

    pub fn full_path(&self, id: NodeId) -> PathBuf {
        let mut components = Vec::new();
        let mut current = id;
        while let Some(node) = self.arena.get(current) {
            match node.parent {
                Some(parent) => {
                    components.push(node.name.clone());
                    current = parent;
                }
                None => break,
            }
        }

        let mut path = self.absolute_root.clone();
        for comp in components.iter().rev() {
            path.push(comp);
        }
        path
    }

    /// Read directory children from disk on first expansion.
    pub fn ensure_loaded(&mut self, id: NodeId) -> io::Result<()> {
        let needs_load = self
            .arena
            .get(id)
            .map(|n| n.kind == NodeKind::Dir && n.load_state == LoadState::NotLoaded)
            .unwrap_or(false);
        if !needs_load {
            return Ok(());
        }

        let path = self.full_path(id);
        let entries = load_dir_entries(&path)?;
        for (name, is_dir) in entries {
            let kind = if is_dir { NodeKind::Dir } else { NodeKind::File };
            self.insert_child(id, name, kind);
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.load_state = LoadState::Loaded;
        }
        Ok(())
    }

    /// Depth-first flatten of the expanded portion, directories first
    /// within each level.
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            if id != self.root {
                if let Some(node) = self.arena.get(id) {
                    result.push(FileTreeRow {
                        id,
                        depth,
                        name: node.name.clone(),
                        is_dir: node.kind == NodeKind::Dir,
                        is_expanded: self.expanded.contains(&id),
                    });
                }
            }

            if self.expanded.contains(&id) {
                if let Some(children) = self.arena.get(id).and_then(|n| n.children.as_ref()) {
                    let mut dirs = Vec::new();
                    let mut files = Vec::new();
                    for (_, &child_id) in children.iter() {
                        if self.is_dir(child_id) {
                            dirs.push(child_id);
                        } else {
                            files.push(child_id);
                        }
                    }
                    for file_id in files.into_iter().rev() {
                        stack.push((file_id, depth + 1));
                    }
                    for dir_id in dirs.into_iter().rev() {
                        stack.push((dir_id, depth + 1));
                    }
                }
            }
        }

        result
    }
}

#[derive(Debug, Clone)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: OsString,
    pub is_dir: bool,
    pub is_expanded: bool,
}

fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store" | "Thumbs.db" | "desktop.ini" | ".git" | "node_modules" | "target"
    )
}

fn load_dir_entries(path: &Path) -> io::Result<Vec<(OsString, bool)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        if should_ignore(&name.to_string_lossy()) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    Ok(entries)
}

pub fn build_file_tree(root_path: &Path) -> io::Result<FileTree> {
    let absolute_root = root_path
        .canonicalize()
        .unwrap_or_else(|_| root_path.to_path_buf());

    let root_name = root_path
        .file_name()
        .or_else(|| root_path.iter().next_back())
        .unwrap_or(root_path.as_os_str())
        .to_os_string();

    let mut tree = FileTree::new_with_root(root_name, absolute_root.clone());

    let entries = load_dir_entries(&absolute_root)?;
    for (name, is_dir) in entries {
        let kind = if is_dir { NodeKind::Dir } else { NodeKind::File };
        tree.insert_child(tree.root, name, kind);
    }

    Ok(tree)
}

/*!
 * Folding file records into the WebContainer mount structure
 */

use crate::types::{FileRecord, MountNode, MountTree};

/// Fold records into a nested mount tree
///
/// Every path segment except the last becomes a directory, the last one a
/// file holding the record's content. Later records win on equal paths, and
/// a file standing where a later record needs a directory is replaced by one.
pub fn build_tree(records: &[FileRecord]) -> MountTree {
    let mut root = MountTree::new();
    for record in records {
        insert_record(&mut root, record);
    }
    root
}

fn insert_record(root: &mut MountTree, record: &FileRecord) {
    let (parents, file_name) = match record.path.rsplit_once('/') {
        Some((parents, file_name)) => (Some(parents), file_name),
        None => (None, record.path.as_str()),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('/')) {
        let node = current
            .entry(segment.to_string())
            .or_insert_with(MountNode::empty_directory);
        current = into_directory(node);
    }

    current.insert(
        file_name.to_string(),
        MountNode::File {
            contents: record.content.clone(),
        },
    );
}

fn into_directory(node: &mut MountNode) -> &mut MountTree {
    match node {
        MountNode::Directory(children) => children,
        MountNode::File { .. } => {
            *node = MountNode::empty_directory();
            into_directory(node)
        }
    }
}

/// Pick the structure that gets mounted
///
/// Uploads are expected to sit inside one wrapper folder (the repository's
/// own directory). The wrapper is stripped: the result is the children of the
/// first top-level entry, or `None` when that entry is missing, is a file, or
/// has no children.
pub fn select_mount_root(tree: &MountTree) -> Option<&MountTree> {
    let (_, first) = tree.first()?;
    first.children().filter(|children| !children.is_empty())
}

/// Follow a slash-delimited path through the tree
pub fn lookup<'a>(tree: &'a MountTree, path: &str) -> Option<&'a MountNode> {
    let mut segments = path.split('/');
    let mut node = tree.get(segments.next()?)?;
    for segment in segments {
        node = node.children()?.get(segment)?;
    }
    Some(node)
}

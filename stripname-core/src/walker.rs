use crate::error::{PlanError, TraversalWarning};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// First character of a hidden filename on this platform's convention
pub const HIDDEN_MARKER: char = '.';

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

/// A file directly inside a walked directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeFile {
    pub name: String,
    pub size: u64,
    pub hidden: bool,
}

/// A directory visited during one walk.
///
/// `parent` and `children` are indices into [`DirectoryTree::directories`];
/// the tree owns every entry.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub files: Vec<TreeFile>,
}

impl DirectoryEntry {
    pub fn visible_files(&self) -> impl Iterator<Item = &TreeFile> {
        self.files.iter().filter(|f| !f.hidden)
    }

    pub fn hidden_files(&self) -> impl Iterator<Item = &TreeFile> {
        self.files.iter().filter(|f| f.hidden)
    }
}

/// Snapshot of a directory tree, in depth-first pre-order, root first.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryTree {
    pub root: PathBuf,
    pub directories: Vec<DirectoryEntry>,
    pub warnings: Vec<TraversalWarning>,
}

impl DirectoryTree {
    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.directories.get(index)
    }

    pub fn parent_of(&self, index: usize) -> Option<&DirectoryEntry> {
        self.get(index)
            .and_then(|dir| dir.parent)
            .and_then(|parent| self.get(parent))
    }

    pub fn file_count(&self) -> usize {
        self.directories.iter().map(|d| d.files.len()).sum()
    }

    pub fn hidden_count(&self) -> usize {
        self.directories
            .iter()
            .map(|d| d.hidden_files().count())
            .sum()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Check that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), PlanError> {
    let metadata = fs::metadata(root).map_err(|e| PlanError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(PlanError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}

/// Walk `root` and every directory beneath it.
///
/// Entries keep the order the filesystem hands them out. Unreadable
/// directories and non UTF-8 names are recorded as warnings and skipped.
/// Symlinks to directories are not followed.
pub fn walk(root: &Path) -> Result<DirectoryTree, PlanError> {
    validate_root(root)?;

    let mut tree = DirectoryTree {
        root: root.to_path_buf(),
        directories: Vec::new(),
        warnings: Vec::new(),
    };
    let mut index_of: HashMap<PathBuf, usize> = HashMap::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let message = err
                    .io_error()
                    .map_or_else(|| err.to_string(), ToString::to_string);
                tree.warnings.push(TraversalWarning { path, message });
                continue;
            },
        };

        let path = entry.path();

        if entry.depth() == 0 {
            index_of.insert(path.to_path_buf(), tree.directories.len());
            tree.directories.push(DirectoryEntry {
                path: path.to_path_buf(),
                name: display_name(path),
                parent: None,
                children: Vec::new(),
                files: Vec::new(),
            });
            continue;
        }

        let Some(&parent) = path.parent().and_then(|p| index_of.get(p)) else {
            tree.warnings.push(TraversalWarning {
                path: path.to_path_buf(),
                message: "parent directory was not visited".to_string(),
            });
            continue;
        };

        if entry.file_type().is_dir() {
            let index = tree.directories.len();
            index_of.insert(path.to_path_buf(), index);
            tree.directories.push(DirectoryEntry {
                path: path.to_path_buf(),
                name: display_name(path),
                parent: Some(parent),
                children: Vec::new(),
                files: Vec::new(),
            });
            tree.directories[parent].children.push(index);
            continue;
        }

        // Linked directories are listed by the OS but never descended into
        if entry.path_is_symlink() && path.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tree.warnings.push(TraversalWarning {
                path: path.to_path_buf(),
                message: "file name is not valid UTF-8".to_string(),
            });
            continue;
        };

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        tree.directories[parent].files.push(TreeFile {
            name: name.to_string(),
            size,
            hidden: is_hidden(name),
        });
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(dir: &DirectoryEntry) -> Vec<String> {
        let mut names: Vec<String> = dir.files.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_builds_pre_order_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "abc").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/b.txt"), "").unwrap();
        fs::write(root.join("sub/deeper/c.txt"), "").unwrap();

        let tree = walk(root).unwrap();

        assert_eq!(tree.directories.len(), 3);
        assert!(tree.warnings.is_empty());

        let top = &tree.directories[0];
        assert_eq!(top.parent, None);
        assert_eq!(names(top), vec![".hidden", "a.txt"]);
        assert_eq!(top.children.len(), 1);

        let sub = &tree.directories[top.children[0]];
        assert_eq!(sub.name, "sub");
        assert_eq!(sub.parent, Some(0));
        assert_eq!(names(sub), vec!["b.txt"]);

        let deeper = &tree.directories[sub.children[0]];
        assert_eq!(deeper.name, "deeper");
        assert_eq!(tree.parent_of(sub.children[0]).unwrap().name, "sub");

        // Pre-order: every parent precedes its children
        for (index, dir) in tree.directories.iter().enumerate() {
            if let Some(parent) = dir.parent {
                assert!(parent < index);
            }
        }
    }

    #[test]
    fn test_walk_tracks_hidden_and_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("song.mp3"), "12345").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();

        let tree = walk(root).unwrap();
        let top = &tree.directories[0];

        let visible: Vec<_> = top.visible_files().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "song.mp3");
        assert_eq!(visible[0].size, 5);

        let hidden: Vec<_> = top.hidden_files().collect();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].name, ".DS_Store");
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.hidden_count(), 1);
    }

    #[test]
    fn test_walk_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(matches!(walk(&missing), Err(PlanError::InvalidRoot { .. })));
    }

    #[test]
    fn test_walk_rejects_file_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "").unwrap();

        match walk(&file) {
            Err(PlanError::InvalidRoot { reason, .. }) => assert_eq!(reason, "not a directory"),
            other => panic!("expected InvalidRoot, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let locked = root.join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("secret.txt"), "").unwrap();
        fs::write(root.join("open.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root ignores permission bits
        let readable = fs::read_dir(&locked).is_ok();
        let tree = walk(root).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            return;
        }
        assert_eq!(tree.warnings.len(), 1);
        assert!(tree.warnings[0].path.ends_with("locked"));
        let locked_entry = tree
            .directories
            .iter()
            .find(|d| d.name == "locked")
            .unwrap();
        assert!(locked_entry.files.is_empty());
    }
}

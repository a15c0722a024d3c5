use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gix::object::tree::EntryKind;

use crate::{Result, StyleGuardError};

use super::ChangeSet;

/// Blob id for every file path in a tree, relative to the tree root.
type Listing = HashMap<PathBuf, gix::ObjectId>;

fn git_error(context: impl std::fmt::Display, e: impl std::fmt::Display) -> StyleGuardError {
    StyleGuardError::Git(format!("{context}: {e}"))
}

/// Index and commit comparisons read straight from the object database.
///
/// Paths are relative to the working tree root. Files that only exist on
/// the older side of a comparison are never reported.
pub struct GitDiff {
    repo_path: PathBuf,
    workdir: PathBuf,
}

impl GitDiff {
    /// Find the repository containing `path`.
    ///
    /// # Errors
    /// Returns an error if no repository with a working tree is found.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo =
            gix::discover(path).map_err(|e| git_error("Failed to discover git repository", e))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| StyleGuardError::Git("Repository has no working directory".into()))?
            .to_path_buf();
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
        })
    }

    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path).map_err(|e| git_error("Failed to open git repository", e))
    }

    /// Files whose index entry is new or differs from HEAD, sorted.
    ///
    /// # Errors
    /// Returns an error if the index or HEAD tree cannot be read.
    pub fn get_staged_files(&self) -> Result<Vec<PathBuf>> {
        let repo = self.open()?;
        let index = repo
            .open_index()
            .map_err(|e| git_error("Failed to open git index", e))?;

        // Without a first commit every index entry counts as staged.
        let head = match repo.head_commit() {
            Ok(commit) => {
                let tree = commit
                    .tree()
                    .map_err(|e| git_error("Failed to get HEAD tree", e))?;
                list_tree(&tree)?
            }
            Err(_) => Listing::new(),
        };

        let mut staged: Vec<PathBuf> = index
            .entries()
            .iter()
            .map(|entry| {
                let path = PathBuf::from(String::from_utf8_lossy(entry.path(&index)).as_ref());
                (path, entry.id)
            })
            .filter(|(path, id)| head.get(path) != Some(id))
            .map(|(path, _)| path)
            .collect();
        staged.sort();
        Ok(staged)
    }

    /// Files added or modified between `base_ref` and HEAD, sorted.
    ///
    /// # Errors
    /// Returns an error if either revision cannot be resolved to a commit.
    pub fn get_changed_files_since(&self, base_ref: &str) -> Result<Vec<PathBuf>> {
        let repo = self.open()?;
        let base = list_commit(&repo, base_ref)?;
        let head = list_commit(&repo, "HEAD")?;

        let mut changed: Vec<PathBuf> = head
            .into_iter()
            .filter(|(path, id)| base.get(path) != Some(id))
            .map(|(path, _)| path)
            .collect();
        changed.sort();
        Ok(changed)
    }

    /// # Errors
    /// Returns an error if the index or HEAD cannot be read.
    pub fn staged_change_set(&self) -> Result<ChangeSet> {
        Ok(ChangeSet {
            root: self.workdir.clone(),
            paths: self.get_staged_files()?,
        })
    }

    /// # Errors
    /// Returns an error if `base_ref` cannot be resolved.
    pub fn change_set_since(&self, base_ref: &str) -> Result<ChangeSet> {
        Ok(ChangeSet {
            root: self.workdir.clone(),
            paths: self.get_changed_files_since(base_ref)?,
        })
    }
}

fn list_commit(repo: &gix::Repository, revision: &str) -> Result<Listing> {
    let context = || format!("Failed to resolve '{revision}'");
    let tree = repo
        .rev_parse_single(revision)
        .map_err(|e| git_error(context(), e))?
        .object()
        .map_err(|e| git_error(context(), e))?
        .peel_to_commit()
        .map_err(|e| git_error(context(), e))?
        .tree()
        .map_err(|e| git_error(context(), e))?;
    list_tree(&tree)
}

fn list_tree(root: &gix::Tree<'_>) -> Result<Listing> {
    let mut listing = Listing::new();
    let mut pending = Vec::new();
    list_entries(root, Path::new(""), &mut listing, &mut pending)?;
    while let Some((prefix, tree)) = pending.pop() {
        list_entries(&tree, &prefix, &mut listing, &mut pending)?;
    }
    Ok(listing)
}

/// Record the blobs of one tree level and queue its subtrees.
fn list_entries<'repo>(
    tree: &gix::Tree<'repo>,
    prefix: &Path,
    listing: &mut Listing,
    pending: &mut Vec<(PathBuf, gix::Tree<'repo>)>,
) -> Result<()> {
    for entry in tree.iter() {
        let entry = entry.map_err(|e| git_error("Failed to read tree entry", e))?;
        let path = prefix.join(String::from_utf8_lossy(entry.filename()).as_ref());
        match entry.mode().kind() {
            EntryKind::Blob | EntryKind::BlobExecutable | EntryKind::Link => {
                listing.insert(path, entry.oid().into());
            }
            EntryKind::Tree => {
                let subtree = entry
                    .object()
                    .map_err(|e| git_error("Failed to read subtree", e))?
                    .into_tree();
                pending.push((path, subtree));
            }
            _ => {}
        }
    }
    Ok(())
}

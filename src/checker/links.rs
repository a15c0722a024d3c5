//! Temporary links for extensionless sources.
//!
//! A checker that filters by extension ignores `bin/tool`, so it is handed
//! `bin/tool.py` instead: a hard link next to the original, or a symbolic
//! link in a scratch directory when hard linking fails. Every link lives in
//! a [`LinkSet`] that removes it on drop, and is also recorded in a shared
//! [`LinkRegistry`] so an interrupt handler can remove it before the
//! process exits.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tempfile::TempDir;

use crate::error::{Result, StyleGuardError};

#[derive(Debug, Default)]
struct Active {
    links: Vec<PathBuf>,
    scratch_dirs: Vec<PathBuf>,
}

/// Process-wide record of live links, shared with the interrupt handler.
#[derive(Debug, Clone, Default)]
pub struct LinkRegistry {
    active: Arc<Mutex<Active>>,
}

impl LinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Active> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Links currently recorded.
    #[must_use]
    pub fn active_links(&self) -> Vec<PathBuf> {
        self.lock().links.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let active = self.lock();
        active.links.is_empty() && active.scratch_dirs.is_empty()
    }

    /// Remove every recorded link and scratch directory.
    ///
    /// Returns the number of links removed.
    pub fn drain(&self) -> usize {
        let mut active = self.lock();
        let links = std::mem::take(&mut active.links);
        let scratch_dirs = std::mem::take(&mut active.scratch_dirs);
        drop(active);

        let removed = links.iter().filter(|link| remove_link(link)).count();
        for dir in &scratch_dirs {
            if let Err(e) = fs::remove_dir_all(dir)
                && e.kind() != io::ErrorKind::NotFound
            {
                log::warn!("Failed to remove {}: {e}", dir.display());
            }
        }
        removed
    }

    fn record_link(&self, link: &Path) {
        self.lock().links.push(link.to_path_buf());
    }

    fn forget_link(&self, link: &Path) {
        self.lock().links.retain(|l| l != link);
    }

    fn record_scratch(&self, dir: &Path) {
        self.lock().scratch_dirs.push(dir.to_path_buf());
    }

    fn forget_scratch(&self, dir: &Path) {
        self.lock().scratch_dirs.retain(|d| d != dir);
    }
}

/// Result of adapting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linked {
    /// A link with the required extension was created.
    Created(PathBuf),
    /// The link name is already taken by an existing file; nothing was created.
    Collision(PathBuf),
}

/// Links created for one checker invocation, removed when dropped.
#[derive(Debug)]
pub struct LinkSet<'r> {
    registry: &'r LinkRegistry,
    links: Vec<PathBuf>,
    scratch: Option<TempDir>,
}

impl<'r> LinkSet<'r> {
    #[must_use]
    pub const fn new(registry: &'r LinkRegistry) -> Self {
        Self {
            registry,
            links: Vec::new(),
            scratch: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Link `original` (absolute) under a name ending in `.<ext>`.
    ///
    /// # Errors
    /// Returns an error if neither a hard link nor a symbolic link can be made.
    pub fn link(&mut self, original: &Path, ext: &str) -> Result<Linked> {
        let beside = append_extension(original, ext);
        if beside.symlink_metadata().is_ok() {
            log::warn!(
                "{} already exists, not linking {}",
                beside.display(),
                original.display()
            );
            return Ok(Linked::Collision(beside));
        }

        match self.create_tracked(&beside, |link| fs::hard_link(original, link)) {
            Ok(()) => Ok(Linked::Created(beside)),
            Err(e) => {
                log::debug!(
                    "Hard link {} failed ({e}), using a symbolic link",
                    beside.display()
                );
                self.symlink_in_scratch(original, ext)
            }
        }
    }

    fn symlink_in_scratch(&mut self, original: &Path, ext: &str) -> Result<Linked> {
        let index = self.links.len();
        let scratch = self.scratch_dir()?;
        // One subdirectory per link keeps equal file names from colliding.
        let dir = scratch.join(index.to_string());
        fs::create_dir_all(&dir)?;

        let name = original.file_name().ok_or_else(|| {
            StyleGuardError::Config(format!("{} has no file name", original.display()))
        })?;
        let link = append_extension(&dir.join(name), ext);
        self.create_tracked(&link, |link| symlink(original, link))?;
        Ok(Linked::Created(link))
    }

    fn scratch_dir(&mut self) -> Result<PathBuf> {
        if let Some(dir) = &self.scratch {
            return Ok(dir.path().to_path_buf());
        }
        let dir = tempfile::Builder::new().prefix("style-guard-").tempdir()?;
        let path = dir.path().to_path_buf();
        self.registry.record_scratch(&path);
        self.scratch = Some(dir);
        Ok(path)
    }

    /// Create `link` with `make`, recorded in the registry beforehand so an
    /// interrupt arriving mid-creation still removes it.
    fn create_tracked(
        &mut self,
        link: &Path,
        make: impl FnOnce(&Path) -> io::Result<()>,
    ) -> io::Result<()> {
        self.registry.record_link(link);
        if let Err(e) = make(link) {
            self.registry.forget_link(link);
            return Err(e);
        }
        log::debug!("Created temporary link {}", link.display());
        self.links.push(link.to_path_buf());
        Ok(())
    }
}

impl Drop for LinkSet<'_> {
    fn drop(&mut self) {
        for link in self.links.drain(..) {
            remove_link(&link);
            self.registry.forget_link(&link);
        }
        if let Some(dir) = self.scratch.take() {
            self.registry.forget_scratch(dir.path());
            if let Err(e) = dir.close()
                && e.kind() != io::ErrorKind::NotFound
            {
                log::warn!("Failed to remove scratch directory: {e}");
            }
        }
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Remove one link, tolerating it being gone already.
fn remove_link(link: &Path) -> bool {
    match fs::remove_file(link) {
        Ok(()) => {
            log::debug!("Removed temporary link {}", link.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Failed to remove temporary link {}: {e}", link.display());
            false
        }
    }
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;

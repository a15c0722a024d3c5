use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against `base` without resolving symlinks.
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    dunce::simplified(&normalize_lexically(&joined)).to_path_buf()
}

/// Remove `.` components and fold `..` into the preceding component.
///
/// Purely lexical: symlinked parents are not consulted.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Express absolute `path` relative to absolute `base`, using `..` where needed.
///
/// Returns `None` when the two share no root (e.g. different drives).
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let path_components: Vec<_> = path.components().collect();
    let base_components: Vec<_> = base.components().collect();

    if path_components.first() != base_components.first() {
        return None;
    }

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// The shorter of `absolute` and its form relative to `base`, for reports.
#[must_use]
pub fn display_path(absolute: &Path, base: &Path) -> PathBuf {
    match relative_to(absolute, base) {
        Some(relative) if relative.as_os_str().len() < absolute.as_os_str().len() => relative,
        _ => absolute.to_path_buf(),
    }
}

/// Normalize path separators to forward slashes.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

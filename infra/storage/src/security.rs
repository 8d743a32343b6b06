use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

fn traversal(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversalAttempt {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

/// Lexically collapses `.` and `..`; a `..` that would climb above the sandbox root is rejected.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir if out.pop() => {},
            Component::ParentDir => {
                return Err(traversal(path, "Path attempted to escape sandbox via '..'"));
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(path, "Absolute paths are not allowed in sandbox"));
            },
        }
    }

    Ok(out)
}

/// Joins a relative path to the (canonical) root and proves the result stays inside it.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();
    let joined = root.join(normalize_relative(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(traversal(&canonical, "Path resolves outside the sandbox")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => validate_ancestors(root, &joined),
        Err(e) => Err(StorageError::Io {
            source: e,
            context: Some(format!("Failed to resolve {}", joined.display()).into()),
        }),
    }
}

/// Resolves a file path inside an optional namespace directory.
pub(crate) fn resolve_namespaced(
    root: &Path,
    ns: Option<&str>,
    path: impl AsRef<Path>,
) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();
    if path.file_name().is_none() {
        return Err(StorageError::FileNotFound {
            message: path.display().to_string().into(),
            context: Some("Target must be a file".into()),
        });
    }

    match ns {
        Some(n) => resolve_path(root, Path::new(n).join(path)),
        None => resolve_path(root, path),
    }
}

/// A path that does not exist yet is accepted when its nearest existing ancestor
/// canonicalizes inside the sandbox (this catches symlinked directories).
fn validate_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    if !joined.starts_with(root) {
        return Err(traversal(joined, "Path is outside sandbox boundaries"));
    }

    for ancestor in joined.ancestors() {
        if ancestor == root {
            return Ok(joined.to_path_buf());
        }
        if !ancestor.exists() {
            continue;
        }
        return match ancestor.canonicalize() {
            Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
            Ok(canonical) => {
                Err(traversal(&canonical, "Existing parent directory is a symlink outside sandbox"))
            },
            Err(e) => Err(StorageError::Io {
                source: e,
                context: Some("Failed to verify parent directory".into()),
            }),
        };
    }

    Err(traversal(joined, "No valid parent directory found within sandbox"))
}

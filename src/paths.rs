//! Path helpers for normalizing configured paths.
//!
//! Pure path manipulation, no filesystem I/O: relative paths are anchored at
//! an explicit base directory instead of the process working directory so
//! callers decide which directory counts as "current".

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` when it is relative, then drop `.` and
/// fold `..` components.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize_path_components(&joined)
}

/// Final component of a directory path, used to derive a repository name.
pub fn dir_name(path: &Path) -> Option<String> {
    normalize_path_components(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Normalize path components without touching the filesystem.
pub fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => {
                // Windows drive prefix (e.g., C:)
                components.push(Component::Prefix(p));
            }
            Component::RootDir => {
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else {
                    // Can't go up from root, keep the component
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(name) => {
                components.push(Component::Normal(name));
            }
        }
    }

    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize_relative() {
        let resolved = absolutize(Path::new("./horusec-manager"), Path::new("/home/usr"));
        assert_eq!(resolved, PathBuf::from("/home/usr/horusec-manager"));
    }

    #[test]
    fn test_absolutize_current_dir() {
        let resolved = absolutize(Path::new("./"), Path::new("/home/usr/project"));
        assert_eq!(resolved, PathBuf::from("/home/usr/project"));
    }

    #[test]
    fn test_absolutize_keeps_absolute() {
        let resolved = absolutize(Path::new("/srv/app/../api"), Path::new("/home/usr"));
        assert_eq!(resolved, PathBuf::from("/srv/api"));
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(dir_name(Path::new("/home/usr/project")), Some("project".to_string()));
        assert_eq!(dir_name(Path::new("/home/usr/project/.")), Some("project".to_string()));
        assert_eq!(dir_name(Path::new("/")), None);
    }
}

use std::path::{Component, Path, PathBuf};

/// Normalize a path for comparison.
///
/// The deepest existing ancestor is canonicalized and the missing tail is re-appended,
/// so a not-yet-created output directory still compares correctly against a
/// canonical source root (e.g. `/var/...` vs `/private/var/...` on macOS).
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return tail
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Module specifier that reaches `target` from a file located in `from_dir`.
///
/// Always starts with `./` or `../` so bundlers treat it as a relative import.
pub fn relative_module_prefix(from_dir: &Path, target: &Path) -> String {
    let from = normalize_path(from_dir);
    let to = normalize_path(target);

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();
    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..from_parts.len() {
        segments.push("..".to_string());
    }
    for part in &to_parts[common..] {
        segments.push(part.as_os_str().to_string_lossy().into_owned());
    }

    match segments.first() {
        None => ".".to_string(),
        Some(first) if first == ".." => segments.join("/"),
        Some(_) => format!("./{}", segments.join("/")),
    }
}

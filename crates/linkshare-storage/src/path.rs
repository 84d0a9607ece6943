//! Lexical path handling for slash-separated virtual paths.
//!
//! These functions never touch the disk. [`clean`] is the single place
//! where `.` and `..` are resolved, and it cannot produce a path above `/`.

/// Normalize a path to an absolute, slash-separated form.
///
/// Empty segments and `.` are dropped, `..` pops one segment and is
/// ignored at the root. The result always starts with `/` and never ends
/// with one (except for the root itself).
pub fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(path.len() + 1);
    for s in segments {
        out.push('/');
        out.push_str(s);
    }
    out
}

/// Join two virtual paths and clean the result.
pub fn join(base: &str, path: &str) -> String {
    clean(&format!("{base}/{path}"))
}

/// The parent directory of a cleaned path; `/` is its own parent.
pub fn parent(path: &str) -> String {
    let cleaned = clean(path);
    match cleaned.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => cleaned[..idx].to_string(),
    }
}

/// The last segment of a path, ignoring trailing separators.
/// Returns an empty string for the root.
pub fn base_name(path: &str) -> String {
    let cleaned = clean(path);
    cleaned
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Split a file name into stem and extension (extension includes the dot).
pub fn split_ext(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(idx) => (&name[..idx], &name[idx..]),
    }
}

/// Whether `ancestor` is `path` itself or one of its parent directories.
/// Both arguments are cleaned first.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    let path = clean(path);
    let ancestor = clean(ancestor);
    if ancestor == "/" || path == ancestor {
        return true;
    }
    path.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

//! Path manipulation utilities for dogma
//!
//! A repository-scoped argument such as `/project/repo/dir/file.json` is a
//! single string on the command line. The functions here turn it into the
//! project name, the repository name and the in-repository path, and
//! derive the remote file name for `put`.

/// Split a slash-delimited argument into `[project, repo, /rest]`.
///
/// Runs of `/` act as one separator. The first two non-empty segments are
/// the project and repository names. Whatever follows the repository name
/// is kept as one element with a single leading `/`, including a trailing
/// slash if present. A remainder made only of slashes is dropped.
///
/// Returns `None` for input without any non-empty segment (`""`, `"/"`).
///
/// ```
/// use dogma::path::split_path;
///
/// let segments = split_path("//foo//bar/a/").unwrap();
/// assert_eq!(segments, ["foo", "bar", "/a/"]);
///
/// assert_eq!(split_path("/foo/bar/").unwrap(), ["foo", "bar"]);
/// assert_eq!(split_path("/"), None);
/// ```
pub fn split_path(path: &str) -> Option<Vec<String>> {
    let mut segments = Vec::with_capacity(3);
    let mut rest = path;

    while segments.len() < 2 {
        rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            break;
        }
        let end = rest.find('/').unwrap_or(rest.len());
        segments.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    if segments.len() == 2 {
        let remainder = collapse_slashes(rest);
        let remainder = remainder.trim_start_matches('/');
        if !remainder.is_empty() {
            segments.push(format!("/{}", remainder));
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Replace every run of consecutive `/` with a single `/`.
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_was_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        collapsed.push(ch);
    }
    collapsed
}

/// Last element of a slash-separated path.
///
/// Trailing slashes are removed first. An empty path yields `"."` and a
/// path made only of slashes yields `"/"`.
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// Remote path a local file is pushed to.
///
/// When `repo_path` names a directory (ends with `/`), the base name of
/// `local_file` is appended so the push always targets a concrete file.
/// Otherwise `repo_path` is used as given.
pub fn resolve_put_path(repo_path: &str, local_file: &str) -> String {
    let base = base_name(local_file);
    if base != "/" && base != "." && repo_path.ends_with('/') {
        format!("{}{}", repo_path, base)
    } else {
        repo_path.to_string()
    }
}

/// Path pattern matching everything below a directory path.
///
/// Only directory paths (ending with `/`) are widened, file paths are
/// returned unchanged.
pub fn recursive_pattern(path: &str) -> String {
    if path.ends_with('/') {
        format!("{}**", path)
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Option<Vec<String>> {
        Some(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_split_path() {
        let cases: &[(&str, Option<Vec<String>>)] = &[
            ("", None),
            ("/", None),
            ("///", None),
            ("foo", segments(&["foo"])),
            ("/foo/", segments(&["foo"])),
            ("/foo/bar", segments(&["foo", "bar"])),
            ("/foo/bar/", segments(&["foo", "bar"])),
            ("/foo/bar///", segments(&["foo", "bar"])),
            ("foo/bar/a.txt", segments(&["foo", "bar", "/a.txt"])),
            ("/foo/bar/b.txt", segments(&["foo", "bar", "/b.txt"])),
            ("//foo//bar//c.txt", segments(&["foo", "bar", "/c.txt"])),
            ("/foo/bar/a/", segments(&["foo", "bar", "/a/"])),
            ("/foo/bar/a/d.txt", segments(&["foo", "bar", "/a/d.txt"])),
            ("/foo/bar/a/b/e.txt", segments(&["foo", "bar", "/a/b/e.txt"])),
            ("/foo/bar/a/b//f.txt", segments(&["foo", "bar", "/a/b/f.txt"])),
            ("/foo/bar/a//", segments(&["foo", "bar", "/a/"])),
        ];

        for (input, expected) in cases {
            assert_eq!(&split_path(input), expected, "split_path({:?})", input);
        }
    }

    #[test]
    fn test_collapse_slashes() {
        assert_eq!(collapse_slashes("//a///b/"), "/a/b/");
        assert_eq!(collapse_slashes("abc"), "abc");
        assert_eq!(collapse_slashes(""), "");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(""), ".");
        assert_eq!(base_name("/"), "/");
        assert_eq!(base_name("//"), "/");
        assert_eq!(base_name("app.yaml"), "app.yaml");
        assert_eq!(base_name("a/b/app.yaml"), "app.yaml");
        assert_eq!(base_name("a/b/"), "b");
        assert_eq!(base_name("."), ".");
    }

    #[test]
    fn test_resolve_put_path() {
        // Directory target: the local file name is appended
        assert_eq!(
            resolve_put_path("/configs/", "a/b/app.yaml"),
            "/configs/app.yaml"
        );
        assert_eq!(resolve_put_path("/", "app.yaml"), "/app.yaml");

        // Explicit file target is kept
        assert_eq!(
            resolve_put_path("/configs/renamed.yaml", "a/b/app.yaml"),
            "/configs/renamed.yaml"
        );

        // Local names without a usable base name leave the path alone
        assert_eq!(resolve_put_path("/configs/", "/"), "/configs/");
        assert_eq!(resolve_put_path("/configs/", "."), "/configs/");
    }

    #[test]
    fn test_recursive_pattern() {
        assert_eq!(recursive_pattern("/"), "/**");
        assert_eq!(recursive_pattern("/configs/"), "/configs/**");
        assert_eq!(recursive_pattern("/configs/app.yaml"), "/configs/app.yaml");
    }
}

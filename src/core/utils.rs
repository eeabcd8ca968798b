/// Separator between the segments of a materialized path.
pub const SEPARATOR: char = '/';

/// Segment that moves the cursor one level up.
pub const PARENT: &str = "..";

/// Checks that `name` can be used as a single path segment: non-empty, not
/// `.` or `..`, without separators or line breaks.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != PARENT
        && !name.contains(SEPARATOR)
        && !name.contains(['\n', '\r'])
}

/// Appends `segment` to a materialized path.
pub fn join(path: &str, segment: &str) -> String {
    let mut joined = String::with_capacity(path.len() + segment.len() + 1);
    joined.push_str(path);
    joined.push(SEPARATOR);
    joined.push_str(segment);
    joined
}

/// Cuts the last segment off a materialized path.
/// A path without separators (the root marker) is returned unchanged.
pub fn parent(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(pos) => &path[..pos],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("docs"));
        assert!(is_valid_name("a.txt"));
        assert!(is_valid_name(".hidden"));
        assert!(is_valid_name("...")); // only `.` and `..` are reserved

        assert!(!is_valid_name(""));
        assert!(!is_valid_name("."));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("/"));
        assert!(!is_valid_name("line\nbreak"));
        assert!(!is_valid_name("carriage\r"));
    }

    #[test]
    fn test_join_and_parent() {
        let path = join("root", "docs");
        assert_eq!(path, "root/docs");

        let path = join(&path, "notes");
        assert_eq!(path, "root/docs/notes");

        assert_eq!(parent(&path), "root/docs");
        assert_eq!(parent(parent(&path)), "root");
        assert_eq!(parent("root"), "root");
    }
}

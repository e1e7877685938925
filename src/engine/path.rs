//! Action path construction

/// Join solution, path and action name into an absolute action path.
///
/// Missing or empty segments are skipped and repeated slashes collapse,
/// so `("samples", "/filters/", "a.xaction")` and `("samples", "filters",
/// "a.xaction")` both give `/samples/filters/a.xaction`. With every segment empty the result is `/`.
pub fn build_solution_path(
    solution: Option<&str>,
    path: Option<&str>,
    action: Option<&str>,
) -> String {
    let segments: Vec<&str> = [solution, path, action]
        .into_iter()
        .flatten()
        .flat_map(|segment| segment.split('/'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_joins_segments() {
        assert_eq!(
            build_solution_path(Some("samples"), Some("/filters/"), Some("a.xaction")),
            "/samples/filters/a.xaction"
        );
        assert_eq!(
            build_solution_path(None, Some("filters"), Some("a.xaction")),
            "/filters/a.xaction"
        );
        assert_eq!(build_solution_path(Some("s"), Some(""), None), "/s");
        assert_eq!(build_solution_path(None, None, None), "/");
    }

    proptest! {
        #[test]
        fn prop_path_is_absolute_without_empty_segments(
            solution in proptest::option::of("[a-z/]{0,8}"),
            path in proptest::option::of("[a-z/]{0,8}"),
            action in proptest::option::of("[a-z/.]{0,8}"),
        ) {
            let built = build_solution_path(solution.as_deref(), path.as_deref(), action.as_deref());
            prop_assert!(built.starts_with('/'));
            prop_assert!(!built.contains("//"));
            prop_assert!(built == "/" || !built.ends_with('/'));
        }
    }
}

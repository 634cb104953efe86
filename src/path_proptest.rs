//! Property-based tests for path splitting.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{base_name, resolve_put_path, split_path};
    use proptest::prelude::*;

    // ============================================================================
    // split_path property tests
    // ============================================================================

    proptest! {
        /// Property: split_path never returns empty segments or more than three
        #[test]
        fn split_path_segments_are_bounded_and_non_empty(input in "[a-z/.]{0,24}") {
            if let Some(segments) = split_path(&input) {
                prop_assert!(!segments.is_empty());
                prop_assert!(segments.len() <= 3);
                for segment in &segments {
                    prop_assert!(!segment.is_empty(), "empty segment from {:?}", input);
                }
                // Project and repository never contain a separator
                for segment in segments.iter().take(2) {
                    prop_assert!(!segment.contains('/'));
                }
            }
        }

        /// Property: input made only of slashes yields nothing
        #[test]
        fn split_path_slashes_only_is_none(count in 0usize..10) {
            let input = "/".repeat(count);
            prop_assert_eq!(split_path(&input), None);
        }

        /// Property: a/b splits into exactly [a, b]
        #[test]
        fn split_path_two_names(a in "[a-zA-Z0-9_.-]{1,12}", b in "[a-zA-Z0-9_.-]{1,12}") {
            let input = format!("{}/{}", a, b);
            prop_assert_eq!(split_path(&input), Some(vec![a, b]));
        }

        /// Property: slash runs around project and repository do not matter
        #[test]
        fn split_path_collapses_separator_runs(
            a in "[a-z]{1,8}",
            b in "[a-z]{1,8}",
            lead in 0usize..4,
            mid in 1usize..4,
            tail in 0usize..4,
        ) {
            let input = format!(
                "{}{}{}{}{}",
                "/".repeat(lead),
                a,
                "/".repeat(mid),
                b,
                "/".repeat(tail)
            );
            prop_assert_eq!(split_path(&input), Some(vec![a, b]));
        }

        /// Property: the third element starts with exactly one slash and has no slash runs
        #[test]
        fn split_path_file_path_is_normalized(
            rest in "[a-z]{1,6}(/{1,3}[a-z]{1,6}){0,3}/{0,2}",
            sep in 1usize..4,
        ) {
            let input = format!("proj/repo{}{}", "/".repeat(sep), rest);
            let segments = split_path(&input).expect("segments");
            prop_assert_eq!(segments.len(), 3);
            let file_path = &segments[2];
            prop_assert!(file_path.starts_with('/'));
            prop_assert!(!file_path.contains("//"), "slash run in {:?}", file_path);
            prop_assert_eq!(file_path.ends_with('/'), rest.ends_with('/'));
        }
    }

    // ============================================================================
    // resolve_put_path property tests
    // ============================================================================

    proptest! {
        /// Property: a directory target always ends up naming the local file
        #[test]
        fn resolve_put_path_appends_base_name(
            dir in "(/[a-z]{1,6}){0,3}",
            local in "([a-z]{1,6}/){0,3}[a-z]{1,8}\\.(json|yaml|txt)",
        ) {
            let repo_path = format!("{}/", dir);
            let resolved = resolve_put_path(&repo_path, &local);
            prop_assert!(resolved.starts_with(&repo_path));
            prop_assert!(resolved.ends_with(base_name(&local)));
            prop_assert!(!resolved.ends_with('/'));
        }

        /// Property: a file target is never rewritten
        #[test]
        fn resolve_put_path_keeps_file_target(
            target in "(/[a-z]{1,6}){1,3}",
            local in "[a-z]{1,8}",
        ) {
            prop_assert_eq!(resolve_put_path(&target, &local), target);
        }
    }
}

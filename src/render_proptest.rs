//! Property-based tests for the rendering pipeline.
//!
//! These tests use proptest to generate random component trees and verify
//! that the joining invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::component::{Fragment, ListOf, Sequence};
    use crate::modifiers::ComponentExt;
    use crate::render::{render, render_separated};
    use proptest::prelude::*;

    // ============================================================================
    // join identity property tests
    // ============================================================================

    proptest! {
        /// Property: joining fragments equals the standard library join
        /// (no leading or trailing separator, one separator per gap)
        #[test]
        fn join_matches_std_join(
            parts in prop::collection::vec("[a-z0-9]{1,8}", 0..8),
            separator in prop::sample::select(vec!["\n", ", ", "-", " "]),
        ) {
            let list = ListOf::of(parts.iter().map(|part| Fragment::new(part.clone())));
            let rendered = render_separated(&list, separator);
            prop_assert_eq!(rendered, parts.join(separator));
        }

        /// Property: a sequence with exactly one non-absent child renders as
        /// that child's value unchanged
        #[test]
        fn single_child_renders_unchanged(
            value in "[ -~]{0,20}",
            absent_before in 0usize..4,
            absent_after in 0usize..4,
        ) {
            let mut sequence = Sequence::new();
            for _ in 0..absent_before {
                sequence = sequence.append(Fragment::absent());
            }
            sequence = sequence.append(Fragment::new(value.clone()));
            for _ in 0..absent_after {
                sequence = sequence.append(Fragment::absent());
            }
            prop_assert_eq!(render(&sequence), value);
        }

        /// Property: a sequence whose children are all absent renders as the
        /// empty string at the top level, regardless of arity
        #[test]
        fn all_absent_renders_empty(arity in 0usize..10) {
            let mut sequence = Sequence::new();
            for _ in 0..arity {
                sequence = sequence.append(Fragment::absent());
            }
            prop_assert_eq!(render(&sequence), "");
        }

        /// Property: absent children never contribute separators: rendering
        /// a mix of present and absent fragments equals joining the present
        /// ones alone
        #[test]
        fn absent_children_contribute_nothing(
            parts in prop::collection::vec(
                prop::option::of("[a-z]{1,6}"),
                0..10,
            ),
        ) {
            let list = ListOf::of(parts.iter().map(|part| match part {
                Some(text) => Fragment::new(text.clone()),
                None => Fragment::absent(),
            }));
            let expected = parts
                .iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert_eq!(render(&list), expected);
        }
    }

    // ============================================================================
    // separator scoping property tests
    // ============================================================================

    proptest! {
        /// Property: an inner join's separator never leaks into the outer
        /// join, and the outer separator never leaks into the inner join
        #[test]
        fn nested_joins_never_leak(
            outer_parts in prop::collection::vec("[a-z]{1,5}", 1..4),
            inner_parts in prop::collection::vec("[a-z]{1,5}", 1..4),
        ) {
            let inner = ListOf::of(inner_parts.iter().map(|p| Fragment::new(p.clone()))).joined(",");
            let mut outer = Sequence::new();
            for part in &outer_parts {
                outer = outer.append(Fragment::new(part.clone()));
            }
            let outer = outer.append(inner);

            let mut expected = outer_parts.clone();
            expected.push(inner_parts.join(","));
            prop_assert_eq!(render(&outer), expected.join("\n"));
        }

        /// Property: rendering is idempotent: the same tree renders to the
        /// same output every time
        #[test]
        fn render_is_idempotent(
            parts in prop::collection::vec("[ -~]{0,10}", 0..8),
            separator in prop::sample::select(vec!["\n", "|", ""]),
        ) {
            let list = ListOf::of(parts.iter().map(|p| Fragment::new(p.clone())));
            let first = render_separated(&list, separator);
            let second = render_separated(&list, separator);
            prop_assert_eq!(first, second);
        }
    }

    // ============================================================================
    // line modifier property tests
    // ============================================================================

    proptest! {
        /// Property: prefixing every line preserves the line count
        #[test]
        fn prefix_preserves_line_count(
            text in "[a-z\n]{0,30}",
            prefix in "[>#] ?",
        ) {
            let prefixed = Fragment::new(text.clone()).prefixed(prefix);
            let rendered = render(&prefixed);
            prop_assert_eq!(
                rendered.split('\n').count(),
                text.split('\n').count()
            );
        }

        /// Property: an identity map over all lines changes nothing
        #[test]
        fn identity_map_lines_is_noop(text in "[a-z\n]{0,30}") {
            let mapped = Fragment::new(text.clone())
                .map_lines(crate::modifiers::LineSelection::All, |line| Some(line.to_string()));
            prop_assert_eq!(render(&mapped), text);
        }
    }
}

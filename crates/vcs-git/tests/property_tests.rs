use proptest::prelude::*;
use vcs_git::parse::{format_status, parse_branches, parse_status};
use vcs_git::{FileStatus, StatusMap};

fn status_char() -> impl Strategy<Value = Option<char>> {
    prop::option::of(prop::sample::select(vec!['M', 'A', 'D', 'R', 'C', 'U', '?', '!', 'T']))
}

fn file_status() -> impl Strategy<Value = FileStatus> {
    (status_char(), status_char())
        .prop_filter("at least one side changed", |(w, i)| w.is_some() || i.is_some())
        .prop_map(|(working_tree, index)| FileStatus {
            working_tree,
            index,
        })
}

fn status_map() -> impl Strategy<Value = StatusMap> {
    prop::collection::btree_map(
        "[a-zA-Z0-9_.-]([a-zA-Z0-9_. /-]{0,30}[a-zA-Z0-9_.-])?",
        file_status(),
        0..20,
    )
}

proptest! {
    #[test]
    fn test_status_reparse_is_identity(statuses in status_map()) {
        let rendered = format_status(&statuses);
        let reparsed = parse_status(&rendered);
        prop_assert_eq!(&reparsed, &statuses);

        // Parsing again from the re-rendered form changes nothing.
        prop_assert_eq!(parse_status(&format_status(&reparsed)), reparsed);
    }

    #[test]
    fn test_status_never_panics(s in "\\PC*") {
        let statuses = parse_status(&s);
        for status in statuses.values() {
            prop_assert!(status.working_tree.is_some() || status.index.is_some());
        }
    }

    #[test]
    fn test_branches_never_start_with_marker(
        names in prop::collection::vec("[a-z][a-z0-9/_-]{0,20}", 0..10),
        current in any::<prop::sample::Index>(),
    ) {
        let current = if names.is_empty() { 0 } else { current.index(names.len()) };
        let output: String = names
            .iter()
            .enumerate()
            .map(|(i, n)| if i == current { format!("* {}\n", n) } else { format!("  {}\n", n) })
            .collect();

        let parsed = parse_branches(&output);
        prop_assert_eq!(&parsed, &names);
        prop_assert!(parsed.iter().all(|b| !b.starts_with('*')));
    }
}

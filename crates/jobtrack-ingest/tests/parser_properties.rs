//! Property tests for the permissive CSV parser.

use jobtrack_ingest::parse;
use proptest::prelude::*;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

proptest! {
    #[test]
    fn parse_never_panics(content in any::<String>()) {
        let _ = parse(&content);
    }

    #[test]
    fn quoted_fields_survive_verbatim(
        rows in prop::collection::vec(
            prop::collection::vec("[a-zA-Z0-9 ,\"\n\r]{0,12}", 2..5),
            1..6,
        )
    ) {
        let content = rows
            .iter()
            .map(|row| row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(parse(&content), rows);
    }

    #[test]
    fn unquoted_fields_are_trimmed(
        rows in prop::collection::vec(
            prop::collection::vec("[a-z]{1,6}", 1..5),
            1..6,
        ),
        pad in " {0,3}",
    ) {
        let content = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|f| format!("{pad}{f}{pad}"))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\r\n");
        prop_assert_eq!(parse(&content), rows);
    }
}

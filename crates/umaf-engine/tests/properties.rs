//! Property tests over generated markdown-ish and plain documents: every
//! envelope is a valid tree, normalization is a fixed point and JSON
//! round-trips losslessly.

use std::path::Path;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use umaf_engine::snapshot::validate;
use umaf_engine::{Engine, Envelope, ensure_root_span_and_block};

fn engine() -> Engine {
    Engine::new().with_created_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

const LINES: &[&str] = &[
    "# Heading",
    "## Sub heading",
    "#",
    "",
    "   ",
    "- item",
    "* star",
    "1. ordered",
    "| a | b |",
    "|---|---|",
    "| 1 |",
    "```",
    "```rust",
    "---",
    "title: Generated",
];

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(LINES).prop_map(str::to_string),
        1 => "[a-z ]{0,12}",
    ]
}

fn document() -> impl Strategy<Value = (String, &'static str)> {
    (
        prop::collection::vec(line(), 0..40),
        prop::bool::ANY,
        prop_oneof![Just("md"), Just("txt")],
    )
        .prop_map(|(lines, crlf, ext)| {
            let sep = if crlf { "\r\n" } else { "\n" };
            (lines.join(sep), ext)
        })
}

fn envelope_for(text: &str, ext: &str) -> Envelope {
    engine()
        .envelope(Path::new(&format!("generated.{ext}")), text.as_bytes())
        .unwrap()
}

proptest! {
    #[test]
    fn envelopes_satisfy_structural_invariants((text, ext) in document()) {
        let env = envelope_for(&text, ext);

        prop_assert_eq!(validate(&env), Ok(()));
        prop_assert_eq!(env.line_count, env.normalized.split('\n').count());
    }

    #[test]
    fn normalization_is_a_fixed_point((text, ext) in document()) {
        let env = envelope_for(&text, ext);

        let again = engine().renormalize(&env).unwrap();

        prop_assert_eq!(again.text, env.normalized);
    }

    #[test]
    fn transforming_normalized_text_gives_the_same_structure((text, ext) in document()) {
        let first = envelope_for(&text, ext);
        let second = envelope_for(&first.normalized, ext);

        prop_assert_eq!(&first.spans, &second.spans);
        prop_assert_eq!(&first.blocks, &second.blocks);
    }

    #[test]
    fn json_round_trip_is_lossless((text, ext) in document()) {
        let env = envelope_for(&text, ext);

        let back = Envelope::from_json(&env.to_json_pretty().unwrap()).unwrap();

        prop_assert_eq!(back, env);
    }

    #[test]
    fn ensure_root_leaves_built_envelopes_alone((text, ext) in document()) {
        let env = envelope_for(&text, ext);

        prop_assert_eq!(ensure_root_span_and_block(env.clone()), env);
    }
}

use std::path::Path;

use chrono::{TimeZone, Utc};
use umaf_engine::Engine;
use umaf_engine::snapshot::{outline, validate};

#[test]
fn fixture_front_matter() {
    assert_fixture("front_matter", "md");
}

#[test]
fn fixture_code_and_preamble() {
    assert_fixture("code_and_preamble", "md");
}

#[test]
fn fixture_plain_list() {
    assert_fixture("plain_list", "txt");
}

fn assert_fixture(name: &str, ext: &str) {
    let file_name = format!("{name}.{ext}");
    let bytes = std::fs::read(format!(
        "{}/tests/fixtures/{file_name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let env = Engine::new()
        .with_created_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        .envelope(Path::new(&file_name), &bytes)
        .unwrap();
    validate(&env).unwrap();

    insta::assert_debug_snapshot!(name, outline(&env));
}

use oshitag_core::{normalize_tag_text, parse_tags_input};

#[test]
fn normalize_covers_documented_edge_cases() {
    assert_eq!(normalize_tag_text(""), None);
    assert_eq!(normalize_tag_text("#"), None);
    assert_eq!(normalize_tag_text("foo").as_deref(), Some("#foo"));
    assert_eq!(normalize_tag_text("#foo").as_deref(), Some("#foo"));
    assert_eq!(normalize_tag_text("  foo  ").as_deref(), Some("#foo"));
}

#[test]
fn batch_parse_mixed_separators_with_case_insensitive_dedup() {
    assert_eq!(
        parse_tags_input("foo, #Bar  baz #foo"),
        vec!["#foo", "#Bar", "#baz"]
    );
}

#[test]
fn batch_parse_empty_inputs_yield_no_tags() {
    assert_eq!(parse_tags_input(""), Vec::<String>::new());
    assert_eq!(parse_tags_input("   "), Vec::<String>::new());
    assert_eq!(parse_tags_input("#  ,  "), Vec::<String>::new());
}

#[test]
fn hash_acts_as_separator_mid_token() {
    assert_eq!(parse_tags_input("abc#def#ghi"), vec!["#abc", "#def", "#ghi"]);
}

#[test]
fn fullwidth_space_and_commas_separate_tokens() {
    assert_eq!(
        parse_tags_input("one\u{3000}two,three\tfour"),
        vec!["#one", "#two", "#three", "#four"]
    );
}

#[test]
fn first_occurrence_casing_survives_dedup() {
    assert_eq!(parse_tags_input("#Abc #ABC #abc"), vec!["#Abc"]);
}

#[test]
fn unicode_tag_text_is_preserved() {
    assert_eq!(
        parse_tags_input("初音ミク #ミクの日"),
        vec!["#初音ミク", "#ミクの日"]
    );
}

//! Behaviour tests for the transducer as a whole.
//!
//! Fixtures (.md) and snapshots (.snap) are co-located in `fixtures/`; each
//! fixture is snapshotted once per filter view.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::critic::{
    Filter, FilterPolicy, TransduceOptions, UnclosedPolicy, transduce_bytes, transduce_str,
};

const VIEWS: [(&str, FilterPolicy); 5] = [
    ("all", FilterPolicy::show_all()),
    ("original", FilterPolicy::show_all().only_original()),
    ("edited", FilterPolicy::show_all().only_edited()),
    ("original_raw", FilterPolicy::show_all().only_original_raw()),
    ("edited_raw", FilterPolicy::show_all().only_edited_raw()),
];

const FIXTURES: [&str; 2] = ["release_notes", "plain_text"];

fn read_fixture(name: &str) -> String {
    let path = format!("{}/{name}.md", fixtures_dir());
    std::fs::read_to_string(path).unwrap()
}

fn fixtures_dir() -> String {
    format!("{}/src/critic/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn render(input: &str) -> String {
    transduce_str(input, &FilterPolicy::show_all())
}

// Fixture-based snapshot tests

#[test]
fn fixture_release_notes() {
    assert_fixture("release_notes");
}

fn assert_fixture(name: &str) {
    let md = read_fixture(name);
    let fixtures_dir = fixtures_dir();
    for (view, policy) in VIEWS {
        let out = transduce_str(&md, &policy);
        let snapshot_name = format!("{name}_{view}");
        insta::with_settings!({
            snapshot_path => fixtures_dir.as_str(),
            prepend_module_to_snapshot => false,
        }, {
            insta::assert_snapshot!(snapshot_name.as_str(), out);
        });
    }
}

// Canonical transforms

#[rstest]
#[case::insert("{++a++}", "<ins>a</ins>")]
#[case::insert_begin("{++a++}b", "<ins>a</ins>b")]
#[case::insert_end("a{++b++}", "a<ins>b</ins>")]
#[case::insert_middle("a{++b++}c", "a<ins>b</ins>c")]
#[case::insert_leading_space("lacus{++ est++} Pra{e}sent.", "lacus<ins> est</ins> Pra{e}sent.")]
#[case::insert_break("a{++\nb++}c", "a\n<ins class=\"break\">b</ins>c")]
#[case::insert_crlf_break("a{++\r\nb++}c", "a\r\n<ins class=\"break\">b</ins>c")]
#[case::insert_new_paragraph("a{++\n++}b", "a\n<ins class=\"break\">&nbsp;</ins>\nb")]
#[case::insert_empty("a{++++}b", "a<ins>&nbsp;</ins>b")]
#[case::insert_starting_with_plus("{+++a++}", "<ins>+a</ins>")]
#[case::delete("{--a--}", "<del>a</del>")]
#[case::delete_begin("{--a--}b", "<del>a</del>b")]
#[case::delete_end("a{--b--}", "a<del>b</del>")]
#[case::delete_middle("a{--b--}c", "a<del>b</del>c")]
#[case::substitute("{~~a~>b~~}", "<del>a</del><ins>b</ins>")]
#[case::substitute_begin("{~~a~>b~~}c", "<del>a</del><ins>b</ins>c")]
#[case::substitute_end("a{~~b~>c~~}", "a<del>b</del><ins>c</ins>")]
#[case::substitute_middle("a{~~b~>c~~}d", "a<del>b</del><ins>c</ins>d")]
#[case::substitute_break("a{~~b~>\nc~~}d", "a<del>b</del>\n<ins class=\"break\">c</ins>d")]
#[case::substitute_new_paragraph(
    "a{~~b~>\n~~}c",
    "a<del>b</del>\n<ins class=\"break\">&nbsp;</ins>\nc"
)]
#[case::substitute_empty_replacement("{~~a~>~~}", "<del>a</del><ins>&nbsp;</ins>")]
#[case::highlight("{==a==}", "<mark>a</mark>")]
#[case::highlight_begin("{==a==}b", "<mark>a</mark>b")]
#[case::highlight_end("a{==b==}", "a<mark>b</mark>")]
#[case::highlight_middle("a{==b==}c", "a<mark>b</mark>c")]
#[case::comment("{>>a<<}", "<span class=\"critic comment\">a</span>")]
#[case::comment_begin("{>>a<<}b", "<span class=\"critic comment\">a</span>b")]
#[case::comment_end("a{>>b<<}", "a<span class=\"critic comment\">b</span>")]
#[case::comment_middle("a{>>b<<}c", "a<span class=\"critic comment\">b</span>c")]
fn canonical_transforms(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
    chunking::check(input.as_bytes(), &TransduceOptions::default());
}

// Non-matching delimiters stay literal

#[rstest]
#[case::no_insert("a++}b")]
#[case::no_delete_single_dash("{-a-}")]
#[case::no_delete_closer("a--}b")]
#[case::no_substitute_single_tilde("{~a~}")]
#[case::no_substitute_separator("a~>b~~}c")]
#[case::no_substitute_closer("a~~}b")]
#[case::no_highlight_single("{=a=}")]
#[case::no_highlight_closer("a==}b")]
#[case::no_comment_single("{>a<}")]
#[case::no_comment_reversed("{<<a>>}")]
#[case::no_comment_closer("a<<}b")]
#[case::lone_brace("{")]
#[case::trailing_brace("end {")]
#[case::trailing_partial_opener("end {+")]
fn unmatched_delimiters_pass_through(#[case] input: &str) {
    assert_eq!(render(input), input);
}

#[test]
fn plain_text_is_unchanged() {
    let md = read_fixture("plain_text");
    for (view, policy) in VIEWS {
        assert_eq!(transduce_str(&md, &policy), md, "view {view}");
    }
}

#[test]
fn arbitrary_bytes_without_openers_are_unchanged() {
    let input: Vec<u8> = (0u8..=255).filter(|b| *b != b'{').cycle().take(2000).collect();
    assert_eq!(transduce_bytes(&input, &TransduceOptions::default()), input);
    chunking::check(&input, &TransduceOptions::default());
}

#[test]
fn annotations_do_not_nest() {
    assert_eq!(render("{++a{--b--}c++}"), "<ins>a{--b--}c</ins>");
    assert_eq!(render("{--a{++b++}c--}"), "<del>a{++b++}c</del>");
    assert_eq!(render("{>>a{==b==}<<}"), "<span class=\"critic comment\">a{==b==}</span>");
}

#[test]
fn closer_before_separator_stays_literal_inside_substitution() {
    assert_eq!(render("{~~a~~}b~>c~~}"), "<del>a~~}b</del><ins>c</ins>");
}

#[test]
fn doubled_brace_opens_on_second() {
    assert_eq!(render("{{++a++}"), "{<ins>a</ins>");
}

#[test]
fn unicode_content_survives() {
    assert_eq!(
        render("caf{~~é~>e~~} — {++naïve++}"),
        "caf<del>é</del><ins>e</ins> — <ins>naïve</ins>"
    );
}

// Chunking invariance

#[test]
fn fixtures_are_chunking_invariant() {
    for name in FIXTURES {
        let md = read_fixture(name);
        for (_, policy) in VIEWS {
            for unclosed in [UnclosedPolicy::Close, UnclosedPolicy::Passthrough] {
                let options = TransduceOptions {
                    policy,
                    unclosed,
                    ..TransduceOptions::default()
                };
                chunking::check(md.as_bytes(), &options);
            }
        }
    }
}

#[rstest]
#[case("{++ab")]
#[case("{++\n")]
#[case("{~~a~>")]
#[case("{~~a~>b")]
#[case("{--a-")]
#[case("{>>note<")]
#[case("x{")]
fn unterminated_input_is_chunking_invariant(#[case] input: &str) {
    for unclosed in [UnclosedPolicy::Close, UnclosedPolicy::Passthrough] {
        let options = TransduceOptions {
            unclosed,
            ..TransduceOptions::default()
        };
        chunking::check(input.as_bytes(), &options);
    }
}

// Filter composition

#[test]
fn only_original_matches_hide_edited() {
    let md = read_fixture("release_notes");
    assert_eq!(
        transduce_str(&md, &FilterPolicy::show_all().only_original()),
        transduce_str(&md, &FilterPolicy::show_all().hide_edited())
    );
}

#[test]
fn only_original_raw_matches_composed_toggles() {
    let md = read_fixture("release_notes");
    let expected = transduce_str(&md, &FilterPolicy::show_all().only_original_raw());
    let composed = [
        [Filter::HideEdited, Filter::HideComments, Filter::HideTags],
        [Filter::HideTags, Filter::HideEdited, Filter::HideComments],
        [Filter::HideComments, Filter::HideTags, Filter::HideEdited],
    ];
    for filters in composed {
        let policy = FilterPolicy::from_filters(&filters);
        assert_eq!(transduce_str(&md, &policy), expected, "{filters:?}");
    }
}

#[test]
fn hiding_tags_keeps_all_text() {
    let policy = FilterPolicy::show_all().hide_tags();
    assert_eq!(
        transduce_str("a{--b--}{++c++}{>>d<<}{==e==}f", &policy),
        "abcdef"
    );
}

#[test]
fn hiding_comments_drops_comment_text_and_tags() {
    let policy = FilterPolicy::show_all().hide_comments();
    assert_eq!(transduce_str("a{>>note<<}{--b--}c", &policy), "abc");
}

#[test]
fn filtering_never_changes_recognition() {
    // Hidden openers still switch modes: the closer after them must be
    // recognized, not copied.
    let policy = FilterPolicy::show_all().hide_original().hide_tags();
    assert_eq!(transduce_str("x{--y--}--}z", &policy), "x--}z");
}

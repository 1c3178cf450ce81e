// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for the structural parser.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use yare::parameterized;

use super::*;

fn parse_default(text: &str) -> Result<Pattern, ParseError> {
    parse(text, Flags::default())
}

fn single_element(text: &str) -> Node {
    let pattern = parse_default(text).unwrap();
    let [branch] = pattern.alternation.branches.as_slice() else {
        panic!("expected one branch in {text:?}");
    };
    let [element] = branch.elements.as_slice() else {
        panic!("expected one element in {text:?}");
    };
    element.clone()
}

#[test]
fn flags_parse_sets_the_matching_fields() {
    let flags = Flags::parse("giv");
    assert!(flags.global);
    assert!(flags.ignore_case);
    assert!(flags.unicode_sets);
    assert!(!flags.multiline);
    assert!(!flags.unicode);
}

#[test]
fn alternation_splits_on_pipes() {
    let pattern = parse_default("a|b|c").unwrap();
    assert_eq!(pattern.alternation.branches.len(), 3);
}

#[test]
fn empty_branches_parse() {
    let pattern = parse_default("a||").unwrap();
    assert_eq!(pattern.alternation.branches.len(), 3);
    assert!(pattern.alternation.branches[1].elements.is_empty());
    assert!(pattern.alternation.branches[2].elements.is_empty());
}

#[parameterized(
    star = { "a*", 0, None, true },
    plus = { "a+", 1, None, true },
    optional = { "a?", 0, Some(1), true },
    lazy_star = { "a*?", 0, None, false },
    exact = { "a{3}", 3, Some(3), true },
    at_least = { "a{2,}", 2, None, true },
    bounded = { "a{2,4}", 2, Some(4), true },
    lazy_bounded = { "a{2,4}?", 2, Some(4), false },
)]
fn quantifier_bounds(text: &str, min: u32, max: Option<u32>, greedy: bool) {
    let Node::Quantifier(quantifier) = single_element(text) else {
        panic!("expected a quantifier in {text:?}");
    };
    assert_eq!(quantifier.min, min);
    assert_eq!(quantifier.max, max);
    assert_eq!(quantifier.greedy, greedy);
}

#[test]
fn quantifier_span_covers_atom_and_suffix() {
    let Node::Quantifier(quantifier) = single_element("a{2,4}?") else {
        panic!("expected a quantifier");
    };
    assert_eq!(quantifier.span, crate::finding::Span::new(0, 7));
}

#[test]
fn brace_without_valid_bounds_is_a_literal() {
    let pattern = parse_default("a{x}").unwrap();
    assert_eq!(pattern.alternation.branches[0].elements.len(), 4);
}

#[parameterized(
    capturing = { "(a)", GroupKind::Capturing },
    non_capturing = { "(?:a)", GroupKind::NonCapturing },
    lookahead = { "(?=a)", GroupKind::Lookahead { negate: false } },
    negative_lookahead = { "(?!a)", GroupKind::Lookahead { negate: true } },
    lookbehind = { "(?<=a)", GroupKind::Lookbehind { negate: false } },
    negative_lookbehind = { "(?<!a)", GroupKind::Lookbehind { negate: true } },
    named = { "(?<word>a)", GroupKind::Named },
)]
fn group_kinds(text: &str, kind: GroupKind) {
    let Node::Group(group) = single_element(text) else {
        panic!("expected a group in {text:?}");
    };
    assert_eq!(group.kind, kind);
}

#[test]
fn anchors_and_word_boundaries_are_assertions() {
    let pattern = parse_default(r"^a\b$").unwrap();
    let kinds: Vec<_> = pattern.alternation.branches[0]
        .elements
        .iter()
        .filter_map(|node| match node {
            Node::Assertion(assertion) => Some(assertion.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![AssertionKind::Start, AssertionKind::WordBoundary, AssertionKind::End]
    );
}

#[parameterized(
    digit = { r"\d", AtomKind::Perl(PerlClass::Digit) },
    not_word = { r"\W", AtomKind::Perl(PerlClass::NotWord) },
    dot = { ".", AtomKind::Dot },
    backref = { r"\1", AtomKind::Backreference },
    named_backref = { r"\k<x>", AtomKind::Backreference },
    property = { r"\p{L}", AtomKind::Opaque },
    newline = { r"\n", AtomKind::Literal('\n') },
    hex = { r"\x41", AtomKind::Literal('A') },
    braced_unicode = { r"\u{1F600}", AtomKind::Literal('\u{1F600}') },
    four_digit_unicode = { r"\u0041", AtomKind::Literal('A') },
    control = { r"\cJ", AtomKind::Literal('\n') },
    identity = { r"\q", AtomKind::Literal('q') },
)]
fn escape_atoms(text: &str, kind: AtomKind) {
    let Node::Atom(atom) = single_element(text) else {
        panic!("expected an atom in {text:?}");
    };
    assert_eq!(atom.kind, kind);
}

#[test]
fn unpaired_surrogate_is_opaque() {
    let Node::Atom(atom) = single_element(r"\uD800") else {
        panic!("expected an atom");
    };
    assert_eq!(atom.kind, AtomKind::Opaque);
}

#[parameterized(
    open_paren = { "(", ParseError::UnmatchedOpenParen(0) },
    close_paren = { ")", ParseError::UnmatchedCloseParen(0) },
    trailing_close = { "a)", ParseError::UnmatchedCloseParen(1) },
    leading_star = { "*a", ParseError::NothingToRepeat(0) },
    leading_bounds = { "{2}a", ParseError::NothingToRepeat(0) },
    double_quantifier = { "a**", ParseError::NothingToRepeat(2) },
    out_of_order = { "a{3,1}", ParseError::OutOfOrderBounds(1) },
    trailing_backslash = { r"\", ParseError::TrailingBackslash },
    unterminated_class = { "[ab", ParseError::UnterminatedClass(0) },
    modifier_group = { "(?i:a)", ParseError::InvalidGroup(0) },
)]
fn parse_errors(text: &str, expected: ParseError) {
    assert_eq!(parse_default(text).unwrap_err(), expected);
}

#[test]
fn named_group_without_closer_fails_to_parse() {
    // The group falls back to capturing, which then trips over the `?`.
    assert!(parse_default("(?<ab)").is_err());
}

#[test]
fn group_bodies_nest() {
    let Node::Group(outer) = single_element("(?=a(?=b))") else {
        panic!("expected a group");
    };
    let elements = &outer.body.branches[0].elements;
    assert_eq!(elements.len(), 2);
    assert!(matches!(&elements[1], Node::Group(inner) if inner.kind == GroupKind::Lookahead { negate: false }));
}

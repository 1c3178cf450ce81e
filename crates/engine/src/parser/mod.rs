// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural regex parser.
//!
//! Builds a lightweight node tree (groups, quantifiers, character classes,
//! assertions, atoms) from pattern text — enough for the rules that need
//! node boundaries and quantifier bounds, without being a full regex
//! compiler. Parsing doubles as validation: any `ParseError` here is what
//! the validity rule reports as an invalid pattern.
//!
//! The accepted dialect is deliberately loose where the detectors don't
//! care (identity escapes, literal `]`) and strict where they do (group
//! nesting, quantifier placement, Unicode-set class operations).

pub mod class;
pub mod set;

use thiserror::Error;

use crate::finding::Span;
use crate::scan::{self, Delim};

/// Why a pattern failed to parse. Byte offsets point into the text that
/// was being parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unmatched `(` at offset {0}")]
    UnmatchedOpenParen(usize),
    #[error("unmatched `)` at offset {0}")]
    UnmatchedCloseParen(usize),
    #[error("unterminated character class at offset {0}")]
    UnterminatedClass(usize),
    #[error("nothing to repeat at offset {0}")]
    NothingToRepeat(usize),
    #[error("quantifier numbers out of order at offset {0}")]
    OutOfOrderBounds(usize),
    #[error("character class range out of order at offset {0}")]
    OutOfOrderRange(usize),
    #[error("trailing backslash")]
    TrailingBackslash,
    #[error("invalid group at offset {0}")]
    InvalidGroup(usize),
    #[error("invalid character class at offset {0}")]
    InvalidClass(usize),
}

/// Parsed regex flags. Unknown characters are ignored; the validity rule
/// vets the flags text before anything here runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub has_indices: bool,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub sticky: bool,
}

impl Flags {
    /// The flag alphabet the engine recognizes.
    pub const VALID: [char; 8] = ['d', 'g', 'i', 'm', 's', 'u', 'v', 'y'];

    pub fn parse(text: &str) -> Self {
        let mut flags = Self::default();
        for c in text.chars() {
            match c {
                'd' => flags.has_indices = true,
                'g' => flags.global = true,
                'i' => flags.ignore_case = true,
                'm' => flags.multiline = true,
                's' => flags.dot_all = true,
                'u' => flags.unicode = true,
                'v' => flags.unicode_sets = true,
                'y' => flags.sticky = true,
                _ => {}
            }
        }
        flags
    }
}

/// A whole parsed pattern: the implicit outermost group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub span: Span,
    pub alternation: Alternation,
}

/// Tagged node over every construct the detectors distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Group(Group),
    Quantifier(Quantifier),
    Class(CharClass),
    Assertion(Assertion),
    Atom(Atom),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Self::Group(g) => g.span,
            Self::Quantifier(q) => q.span,
            Self::Class(c) => c.span,
            Self::Assertion(a) => a.span,
            Self::Atom(a) => a.span,
        }
    }
}

/// `|`-separated branches. A group body is always an alternation, even
/// when it has a single branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    pub span: Span,
    pub branches: Vec<Branch>,
}

/// One alternation branch; possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub span: Span,
    pub elements: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Capturing,
    NonCapturing,
    Named,
    Lookahead { negate: bool },
    Lookbehind { negate: bool },
}

impl GroupKind {
    pub fn is_lookaround(&self) -> bool {
        matches!(self, Self::Lookahead { .. } | Self::Lookbehind { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub span: Span,
    pub kind: GroupKind,
    pub body: Alternation,
}

/// Repetition over `element`. `max == None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    pub span: Span,
    pub min: u32,
    pub max: Option<u32>,
    pub greedy: bool,
    pub element: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    Start,
    End,
    WordBoundary,
    NotWordBoundary,
}

/// Zero-width position assertion (`^`, `$`, `\b`, `\B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assertion {
    pub span: Span,
    pub kind: AssertionKind,
}

/// One of the `\d \D \w \W \s \S` shorthand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerlClass {
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    /// A concrete character, whether written directly or via an escape.
    Literal(char),
    /// The match-any-character `.`.
    Dot,
    Perl(PerlClass),
    Backreference,
    /// A construct the engine carries but does not model (`\p{...}` etc.).
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub span: Span,
    pub kind: AtomKind,
}

/// A `[...]` character class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    pub span: Span,
    pub negated: bool,
    pub body: ClassBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassBody {
    /// Union of items (the only form outside Unicode-set mode).
    Items(Vec<ClassItem>),
    /// A `&&`/`--` chain (Unicode-set mode only).
    Operation(SetOperation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    Literal { span: Span, value: char },
    Range { span: Span, lo: char, hi: char },
    Perl { span: Span, kind: PerlClass },
    Nested(CharClass),
    /// Carried but not modeled (`\p{...}`, `\q{...}`, octal escapes).
    Opaque { span: Span },
}

impl ClassItem {
    pub fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Range { span, .. }
            | Self::Perl { span, .. }
            | Self::Opaque { span } => *span,
            Self::Nested(c) => c.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Intersection,
    Subtraction,
}

/// One binary `&&`/`--` application. Chains are left-nested, so
/// `[a&&b&&c]` produces an operation whose left side is itself an
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOperation {
    pub span: Span,
    pub op: SetOp,
    pub left: Box<SetExpr>,
    pub right: Box<SetExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetExpr {
    Operand(ClassItem),
    Operation(SetOperation),
}

impl SetExpr {
    pub fn span(&self) -> Span {
        match self {
            Self::Operand(item) => item.span(),
            Self::Operation(op) => op.span,
        }
    }
}

/// Parse `text` under `flags`, validating as it goes.
pub fn parse(text: &str, flags: Flags) -> Result<Pattern, ParseError> {
    let mut parser = Parser { text, bytes: text.as_bytes(), flags, pos: 0 };
    let alternation = parser.parse_alternation(false)?;
    Ok(Pattern { span: Span::new(0, text.len()), alternation })
}

pub(crate) struct Parser<'a> {
    pub(crate) text: &'a str,
    pub(crate) bytes: &'a [u8],
    pub(crate) flags: Flags,
    pub(crate) pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Decode the character at the cursor. The cursor only ever sits on
    /// char boundaries.
    pub(crate) fn next_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn parse_alternation(&mut self, in_group: bool) -> Result<Alternation, ParseError> {
        let start = self.pos;
        let mut branches = vec![self.parse_branch(in_group)?];

        while self.peek() == Some(b'|') {
            self.pos += 1;
            branches.push(self.parse_branch(in_group)?);
        }

        Ok(Alternation { span: Span::new(start, self.pos), branches })
    }

    fn parse_branch(&mut self, in_group: bool) -> Result<Branch, ParseError> {
        let start = self.pos;
        let mut elements = Vec::new();

        loop {
            let Some(b) = self.peek() else { break };

            match b {
                b'|' => break,
                b')' => {
                    if in_group {
                        break;
                    }
                    return Err(ParseError::UnmatchedCloseParen(self.pos));
                }
                b'*' | b'+' | b'?' => return Err(ParseError::NothingToRepeat(self.pos)),
                b'{' if self.scan_bounds(self.pos).is_some() => {
                    return Err(ParseError::NothingToRepeat(self.pos));
                }
                b'(' => {
                    let group = self.parse_group()?;
                    let node = self.maybe_quantified(Node::Group(group))?;
                    elements.push(node);
                }
                b'[' => {
                    let class = self.parse_class()?;
                    let node = self.maybe_quantified(Node::Class(class))?;
                    elements.push(node);
                }
                b'\\' => {
                    let element = self.parse_escape_element()?;
                    let node = self.maybe_quantified(element)?;
                    elements.push(node);
                }
                b'^' => {
                    let node = self.assertion(AssertionKind::Start, 1);
                    elements.push(self.maybe_quantified(node)?);
                }
                b'$' => {
                    let node = self.assertion(AssertionKind::End, 1);
                    elements.push(self.maybe_quantified(node)?);
                }
                b'.' => {
                    let span = Span::new(self.pos, self.pos + 1);
                    self.pos += 1;
                    let node = Node::Atom(Atom { span, kind: AtomKind::Dot });
                    elements.push(self.maybe_quantified(node)?);
                }
                _ => {
                    let node = self.literal_atom()?;
                    elements.push(self.maybe_quantified(node)?);
                }
            }
        }

        Ok(Branch { span: Span::new(start, self.pos), elements })
    }

    fn assertion(&mut self, kind: AssertionKind, width: usize) -> Node {
        let span = Span::new(self.pos, self.pos + width);
        self.pos += width;
        Node::Assertion(Assertion { span, kind })
    }

    fn literal_atom(&mut self) -> Result<Node, ParseError> {
        let Some(c) = self.next_char() else {
            return Err(ParseError::NothingToRepeat(self.pos));
        };
        let span = Span::new(self.pos, self.pos + c.len_utf8());
        self.pos = span.end;
        Ok(Node::Atom(Atom { span, kind: AtomKind::Literal(c) }))
    }

    /// Wrap `node` in a quantifier when one immediately follows it.
    fn maybe_quantified(&mut self, node: Node) -> Result<Node, ParseError> {
        let quant_start = self.pos;
        let (min, max, end) = match self.peek() {
            Some(b'*') => (0, None, self.pos + 1),
            Some(b'+') => (1, None, self.pos + 1),
            Some(b'?') => (0, Some(1), self.pos + 1),
            Some(b'{') => match self.scan_bounds(self.pos) {
                Some((min, max, end)) => {
                    if max.is_some_and(|max| min > max) {
                        return Err(ParseError::OutOfOrderBounds(quant_start));
                    }
                    (min, max, end)
                }
                // `{` with no valid bound is an ordinary atom; leave it
                // for the branch loop.
                None => return Ok(node),
            },
            _ => return Ok(node),
        };

        self.pos = end;
        let greedy = if self.peek() == Some(b'?') {
            self.pos += 1;
            false
        } else {
            true
        };

        let span = Span::new(node.span().start, self.pos);
        Ok(Node::Quantifier(Quantifier { span, min, max, greedy, element: Box::new(node) }))
    }

    /// Recognize `{m}`, `{m,}`, or `{m,n}` starting at `at`; returns
    /// `(min, max, index past '}')`. Bound order is the caller's problem.
    fn scan_bounds(&self, at: usize) -> Option<(u32, Option<u32>, usize)> {
        let mut i = at + 1;
        let (min, next) = self.scan_number(i)?;
        i = next;

        match self.bytes.get(i) {
            Some(b'}') => Some((min, Some(min), i + 1)),
            Some(b',') => {
                i += 1;
                match self.bytes.get(i) {
                    Some(b'}') => Some((min, None, i + 1)),
                    _ => {
                        let (max, next) = self.scan_number(i)?;
                        if self.bytes.get(next) == Some(&b'}') {
                            Some((min, Some(max), next + 1))
                        } else {
                            None
                        }
                    }
                }
            }
            _ => None,
        }
    }

    fn scan_number(&self, at: usize) -> Option<(u32, usize)> {
        let mut i = at;
        let mut value: u32 = 0;
        let mut any = false;

        while let Some(&b) = self.bytes.get(i) {
            if !b.is_ascii_digit() {
                break;
            }
            any = true;
            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            i += 1;
        }

        any.then_some((value, i))
    }

    fn parse_group(&mut self) -> Result<Group, ParseError> {
        let open = self.pos;
        let (kind, content_start) = self.classify_group(open)?;

        self.pos = content_start;
        let body = self.parse_alternation(true)?;

        if self.peek() != Some(b')') {
            return Err(ParseError::UnmatchedOpenParen(open));
        }
        self.pos += 1;

        Ok(Group { span: Span::new(open, self.pos), kind, body })
    }

    fn classify_group(&self, open: usize) -> Result<(GroupKind, usize), ParseError> {
        if self.bytes.get(open + 1) != Some(&b'?') {
            return Ok((GroupKind::Capturing, open + 1));
        }

        match self.bytes.get(open + 2) {
            Some(b':') => Ok((GroupKind::NonCapturing, open + 3)),
            Some(b'=') => Ok((GroupKind::Lookahead { negate: false }, open + 3)),
            Some(b'!') => Ok((GroupKind::Lookahead { negate: true }, open + 3)),
            Some(b'<') => match self.bytes.get(open + 3) {
                Some(b'=') => Ok((GroupKind::Lookbehind { negate: false }, open + 4)),
                Some(b'!') => Ok((GroupKind::Lookbehind { negate: true }, open + 4)),
                // `(?<name>`: scan to the first unescaped `>` inside the
                // group; absent one, fall back to a plain capturing group.
                _ => match self.named_group_content(open) {
                    Some(content_start) => Ok((GroupKind::Named, content_start)),
                    None => Ok((GroupKind::Capturing, open + 1)),
                },
            },
            _ => Err(ParseError::InvalidGroup(open)),
        }
    }

    fn named_group_content(&self, open: usize) -> Option<usize> {
        let close = scan::matching_close(self.text, open, Delim::Paren)?;
        let mut i = open + 3;

        while i < close {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'>' => return Some(i + 1),
                _ => i += 1,
            }
        }

        None
    }

    /// Parse an escape in expression position: an assertion, a shorthand
    /// class, a backreference, or a single-character atom.
    fn parse_escape_element(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let Some(next) = self.peek_at(1) else {
            return Err(ParseError::TrailingBackslash);
        };

        let node = match next {
            b'b' => {
                self.pos = start + 2;
                return Ok(Node::Assertion(Assertion {
                    span: Span::new(start, start + 2),
                    kind: AssertionKind::WordBoundary,
                }));
            }
            b'B' => {
                self.pos = start + 2;
                return Ok(Node::Assertion(Assertion {
                    span: Span::new(start, start + 2),
                    kind: AssertionKind::NotWordBoundary,
                }));
            }
            b'd' | b'D' | b'w' | b'W' | b's' | b'S' => {
                self.pos = start + 2;
                Atom {
                    span: Span::new(start, start + 2),
                    kind: AtomKind::Perl(perl_class(next)),
                }
            }
            b'1'..=b'9' => {
                let mut end = start + 2;
                while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
                    end += 1;
                }
                self.pos = end;
                Atom { span: Span::new(start, end), kind: AtomKind::Backreference }
            }
            b'k' => {
                // `\k<name>`; a bare `\k` stays an identity escape.
                let end = if self.bytes.get(start + 2) == Some(&b'<') {
                    self.unescaped_byte_after(start + 3, b'>')
                } else {
                    None
                };
                match end {
                    Some(end) => {
                        self.pos = end;
                        Atom { span: Span::new(start, end), kind: AtomKind::Backreference }
                    }
                    None => {
                        self.pos = start + 2;
                        Atom { span: Span::new(start, start + 2), kind: AtomKind::Literal('k') }
                    }
                }
            }
            b'p' | b'P' => {
                let end = if self.bytes.get(start + 2) == Some(&b'{') {
                    self.unescaped_byte_after(start + 3, b'}').unwrap_or(start + 2)
                } else {
                    start + 2
                };
                self.pos = end;
                Atom { span: Span::new(start, end), kind: AtomKind::Opaque }
            }
            _ => {
                let (kind, end) = self.escape_char(start)?;
                self.pos = end;
                Atom { span: Span::new(start, end), kind }
            }
        };

        Ok(Node::Atom(node))
    }

    /// Scan for `target` (skipping escapes) and return the index past it.
    fn unescaped_byte_after(&self, from: usize, target: u8) -> Option<usize> {
        let mut i = from;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == target => return Some(i + 1),
                _ => i += 1,
            }
        }
        None
    }

    /// Resolve a character-valued escape starting at `start` (which holds
    /// `\`). Returns the atom kind and the index past the escape.
    ///
    /// Unrecognized escapes resolve to the escaped character itself, the
    /// way sloppy-mode hosts treat identity escapes.
    pub(crate) fn escape_char(&self, start: usize) -> Result<(AtomKind, usize), ParseError> {
        let Some(&next) = self.bytes.get(start + 1) else {
            return Err(ParseError::TrailingBackslash);
        };

        let resolved = match next {
            b't' => Some(('\t', start + 2)),
            b'n' => Some(('\n', start + 2)),
            b'v' => Some(('\u{B}', start + 2)),
            b'f' => Some(('\u{C}', start + 2)),
            b'r' => Some(('\r', start + 2)),
            b'0' => Some(('\0', start + 2)),
            b'x' => self.hex_escape(start + 2, 2).and_then(to_char),
            b'u' => return Ok(self.unicode_escape(start)),
            b'c' => {
                let Some(&ctrl) = self.bytes.get(start + 2) else {
                    return Ok((AtomKind::Opaque, start + 2));
                };
                if ctrl.is_ascii_alphabetic() {
                    Some(((char::from(ctrl % 32)), start + 3))
                } else {
                    return Ok((AtomKind::Opaque, start + 2));
                }
            }
            _ => {
                // Identity escape: the escaped character itself.
                let c = self
                    .text
                    .get(start + 1..)
                    .and_then(|rest| rest.chars().next())
                    .ok_or(ParseError::TrailingBackslash)?;
                Some((c, start + 1 + c.len_utf8()))
            }
        };

        match resolved {
            Some((c, end)) => Ok((AtomKind::Literal(c), end)),
            // `\x` with bad digits: identity escape for the letter.
            None => Ok((AtomKind::Literal(char::from(next)), start + 2)),
        }
    }

    fn unicode_escape(&self, start: usize) -> (AtomKind, usize) {
        if self.bytes.get(start + 2) == Some(&b'{') {
            if let Some(end) = self.unescaped_byte_after(start + 3, b'}') {
                let digits = &self.bytes[start + 3..end - 1];
                if let Some(value) = parse_hex(digits) {
                    return match char::from_u32(value) {
                        Some(c) => (AtomKind::Literal(c), end),
                        None => (AtomKind::Opaque, end),
                    };
                }
            }
            return (AtomKind::Literal('u'), start + 2);
        }

        match self.hex_escape(start + 2, 4) {
            Some((value, end)) => match char::from_u32(value) {
                Some(c) => (AtomKind::Literal(c), end),
                // Unpaired surrogate: carried, not modeled.
                None => (AtomKind::Opaque, end),
            },
            None => (AtomKind::Literal('u'), start + 2),
        }
    }

    fn hex_escape(&self, from: usize, len: usize) -> Option<(u32, usize)> {
        let digits = self.bytes.get(from..from + len)?;
        parse_hex(digits).map(|v| (v, from + len))
    }
}

fn to_char((value, end): (u32, usize)) -> Option<(char, usize)> {
    char::from_u32(value).map(|c| (c, end))
}

fn parse_hex(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    let mut value = 0u32;
    for &b in digits {
        let d = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => return None,
        };
        value = value * 16 + d;
    }
    Some(value)
}

fn perl_class(b: u8) -> PerlClass {
    match b {
        b'd' => PerlClass::Digit,
        b'D' => PerlClass::NotDigit,
        b'w' => PerlClass::Word,
        b'W' => PerlClass::NotWord,
        b's' => PerlClass::Space,
        _ => PerlClass::NotSpace,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

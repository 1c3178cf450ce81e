// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Character class parsing.
//!
//! Outside Unicode-set mode a class is a flat union of items and `&&`/`--`
//! are ordinary literals. Under the `v` flag the class body may instead be
//! a chain of one operator kind applied between single operands; mixing
//! `&&` and `--` at one level, or putting more than one item on a side of
//! an operator, is a parse error, matching the host dialect.

use super::{
    CharClass, ClassBody, ClassItem, ParseError, Parser, SetExpr, SetOp, SetOperation, perl_class,
};
use crate::finding::Span;
use crate::parser::AtomKind;

enum Piece {
    Item(ClassItem),
    Op(SetOp),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_class(&mut self) -> Result<CharClass, ParseError> {
        let open = self.pos;
        self.pos += 1;

        let negated = if self.peek() == Some(b'^') {
            self.pos += 1;
            true
        } else {
            false
        };

        if self.flags.unicode_sets {
            self.parse_class_set_mode(open, negated)
        } else {
            self.parse_class_plain(open, negated)
        }
    }

    fn parse_class_plain(&mut self, open: usize, negated: bool) -> Result<CharClass, ParseError> {
        let mut items = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedClass(open)),
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let item = self.parse_class_member()?;
                    items.push(item);
                }
            }
        }

        Ok(CharClass {
            span: Span::new(open, self.pos),
            negated,
            body: ClassBody::Items(items),
        })
    }

    fn parse_class_set_mode(&mut self, open: usize, negated: bool) -> Result<CharClass, ParseError> {
        let mut pieces = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedClass(open)),
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b'&') if self.peek_at(1) == Some(b'&') => {
                    self.pos += 2;
                    pieces.push(Piece::Op(SetOp::Intersection));
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    pieces.push(Piece::Op(SetOp::Subtraction));
                }
                Some(b'[') => {
                    let nested = self.parse_class()?;
                    pieces.push(Piece::Item(ClassItem::Nested(nested)));
                }
                Some(_) => {
                    let item = self.parse_class_member()?;
                    pieces.push(Piece::Item(item));
                }
            }
        }

        let span = Span::new(open, self.pos);

        if !pieces.iter().any(|p| matches!(p, Piece::Op(_))) {
            let items = pieces
                .into_iter()
                .filter_map(|p| match p {
                    Piece::Item(item) => Some(item),
                    Piece::Op(_) => None,
                })
                .collect();
            return Ok(CharClass { span, negated, body: ClassBody::Items(items) });
        }

        let operation = fold_operation(pieces, open)?;
        Ok(CharClass { span, negated, body: ClassBody::Operation(operation) })
    }

    /// One class member: an escape, a range, or a literal character.
    /// Shared by both modes; the set-mode caller handles nested classes
    /// and operators before getting here.
    fn parse_class_member(&mut self) -> Result<ClassItem, ParseError> {
        let first = self.parse_class_single()?;

        // A range needs a literal on the left, `-` next, and the dash must
        // be neither the class closer nor half of a `--` operator.
        let ClassItem::Literal { span: lo_span, value: lo } = first else {
            return Ok(first);
        };
        if self.peek() != Some(b'-') {
            return Ok(first);
        }
        match self.peek_at(1) {
            None | Some(b']') => return Ok(first),
            Some(b'-') if self.flags.unicode_sets => return Ok(first),
            _ => {}
        }

        self.pos += 1;
        let second = self.parse_class_single()?;

        match second {
            ClassItem::Literal { span: hi_span, value: hi } => {
                if lo > hi {
                    return Err(ParseError::OutOfOrderRange(lo_span.start));
                }
                Ok(ClassItem::Range { span: Span::new(lo_span.start, hi_span.end), lo, hi })
            }
            // `[\d-x]`-style: the dash is a literal. Model the trio as an
            // opaque run; nothing downstream needs finer structure.
            _ => Ok(ClassItem::Opaque { span: Span::new(lo_span.start, second.span().end) }),
        }
    }

    fn parse_class_single(&mut self) -> Result<ClassItem, ParseError> {
        let start = self.pos;

        if self.peek() == Some(b'\\') {
            return self.parse_class_escape();
        }

        let Some(c) = self.next_char() else {
            return Err(ParseError::UnterminatedClass(start));
        };
        let span = Span::new(start, start + c.len_utf8());
        self.pos = span.end;
        Ok(ClassItem::Literal { span, value: c })
    }

    fn parse_class_escape(&mut self) -> Result<ClassItem, ParseError> {
        let start = self.pos;
        let Some(next) = self.peek_at(1) else {
            return Err(ParseError::TrailingBackslash);
        };

        let item = match next {
            b'd' | b'D' | b'w' | b'W' | b's' | b'S' => {
                self.pos = start + 2;
                ClassItem::Perl { span: Span::new(start, start + 2), kind: perl_class(next) }
            }
            // Inside a class `\b` is backspace, not a boundary.
            b'b' => {
                self.pos = start + 2;
                ClassItem::Literal { span: Span::new(start, start + 2), value: '\u{8}' }
            }
            b'p' | b'P' => {
                let end = if self.bytes.get(start + 2) == Some(&b'{') {
                    self.unescaped_byte_after(start + 3, b'}').unwrap_or(start + 2)
                } else {
                    start + 2
                };
                self.pos = end;
                ClassItem::Opaque { span: Span::new(start, end) }
            }
            // `\q{...}` string literals (set mode); carried, not modeled.
            b'q' if self.flags.unicode_sets => {
                let end = if self.bytes.get(start + 2) == Some(&b'{') {
                    self.unescaped_byte_after(start + 3, b'}').unwrap_or(start + 2)
                } else {
                    start + 2
                };
                self.pos = end;
                ClassItem::Opaque { span: Span::new(start, end) }
            }
            // Legacy octal escapes; carried, not modeled.
            b'1'..=b'9' => {
                let mut end = start + 2;
                while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
                    end += 1;
                }
                self.pos = end;
                ClassItem::Opaque { span: Span::new(start, end) }
            }
            _ => {
                let (kind, end) = self.escape_char(start)?;
                self.pos = end;
                let span = Span::new(start, end);
                match kind {
                    AtomKind::Literal(c) => ClassItem::Literal { span, value: c },
                    _ => ClassItem::Opaque { span },
                }
            }
        };

        Ok(item)
    }
}

/// Fold `item (op item)+` left-associatively into nested binary
/// operations, rejecting malformed shapes.
fn fold_operation(pieces: Vec<Piece>, open: usize) -> Result<SetOperation, ParseError> {
    let mut iter = pieces.into_iter();

    let mut expr = match iter.next() {
        Some(Piece::Item(item)) => SetExpr::Operand(item),
        _ => return Err(ParseError::InvalidClass(open)),
    };

    let mut expected_op = None;
    loop {
        let Some(piece) = iter.next() else { break };

        let Piece::Op(op) = piece else {
            // Two operands with no operator between them.
            return Err(ParseError::InvalidClass(open));
        };
        if *expected_op.get_or_insert(op) != op {
            // Mixing `&&` and `--` needs explicit brackets.
            return Err(ParseError::InvalidClass(open));
        }

        let Some(Piece::Item(right)) = iter.next() else {
            return Err(ParseError::InvalidClass(open));
        };

        let span = Span::new(expr.span().start, right.span().end);
        expr = SetExpr::Operation(SetOperation {
            span,
            op,
            left: Box::new(expr),
            right: Box::new(SetExpr::Operand(right)),
        });
    }

    match expr {
        SetExpr::Operation(op) => Ok(op),
        SetExpr::Operand(_) => Err(ParseError::InvalidClass(open)),
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;

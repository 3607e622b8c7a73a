//! Matching text against compiled BBAN structures.
//!
//! Two algorithms share [`StructElem`]: [`parse_iban_structure`] is the
//! validation path and yields the matched segments; [`matches_loosely`] is a
//! lighter yes/no check that lets non-strict elements come up short.

use crate::grammar::{BbanStructure, CharClass, StructElem};

const COUNTRY_ELEM: StructElem = StructElem::strict(CharClass::Upper, 2);
const CHECK_DIGITS_ELEM: StructElem = StructElem::strict(CharClass::Digit, 2);

/// Segments of a structurally valid IBAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSegments<'a> {
    pub country: &'a str,
    pub check_digits: &'a str,
    pub bban: Vec<&'a str>,
}

/// Length in bytes of the longest prefix (at most `limit` chars) of class
/// characters. Class characters are all ASCII.
fn matching_prefix(input: &str, class: CharClass, limit: usize) -> usize {
    input
        .chars()
        .take(limit)
        .take_while(|ch| class.matches(*ch))
        .count()
}

/// Take one element from the front of `rest`.
///
/// Strict elements need exactly `length` class characters. Non-strict
/// elements take the longest class run up to `length`, at least one
/// character; whatever they leave is the next element's input.
fn take_element<'a>(rest: &mut &'a str, elem: &StructElem) -> Option<&'a str> {
    let current: &'a str = *rest;
    let taken = matching_prefix(current, elem.class, elem.length);
    if elem.strict && taken != elem.length {
        return None;
    }
    if taken == 0 {
        return None;
    }
    let (segment, remainder) = current.split_at(taken);
    *rest = remainder;
    Some(segment)
}

/// Parse country code, check digits and every BBAN element of `text`,
/// requiring the input to end right after the last element.
///
/// A non-strict element takes up to `length` class characters but never
/// zero; an empty segment fails the parse.
pub fn parse_iban_structure<'a>(
    structure: &BbanStructure,
    text: &'a str,
) -> Option<ParsedSegments<'a>> {
    let mut rest = text;
    let country = take_element(&mut rest, &COUNTRY_ELEM)?;
    let check_digits = take_element(&mut rest, &CHECK_DIGITS_ELEM)?;

    let mut bban = Vec::with_capacity(structure.elements().len());
    for elem in structure.elements() {
        bban.push(take_element(&mut rest, elem)?);
    }

    if !rest.is_empty() {
        return None;
    }
    Some(ParsedSegments {
        country,
        check_digits,
        bban,
    })
}

/// Loose check of a BBAN body against a structure.
///
/// Strict elements must see exactly `length` class characters. A non-strict
/// element absorbs zero up to `length` class characters and hands the rest
/// on unchanged, so a later strict element may be satisfied by characters a
/// non-strict one did not match. The body must be used up at the end.
pub fn matches_loosely(structure: &BbanStructure, bban: &str) -> bool {
    let mut rest = bban;
    for elem in structure.elements() {
        let taken = matching_prefix(rest, elem.class, elem.length);
        if elem.strict && taken != elem.length {
            return false;
        }
        rest = &rest[taken..];
    }
    rest.is_empty()
}

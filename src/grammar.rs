//! Compact BBAN grammar strings and their compiled form.
//!
//! A grammar is a country code followed by tokens of the form
//! `<length>[!]<class>`, e.g. `GB4!a6!n8!n`. Classes are `n` (digit),
//! `a` (uppercase letter), `c` (uppercase letter or digit) and `e` (space).
//! A `!` makes the element strict: exactly `length` characters of the class.

use crate::country::CountryCode;
use crate::error::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    Upper,
    AlphaNum,
    Space,
}

impl CharClass {
    pub fn from_letter(letter: char) -> Option<CharClass> {
        match letter {
            'n' => Some(CharClass::Digit),
            'a' => Some(CharClass::Upper),
            'c' => Some(CharClass::AlphaNum),
            'e' => Some(CharClass::Space),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CharClass::Digit => 'n',
            CharClass::Upper => 'a',
            CharClass::AlphaNum => 'c',
            CharClass::Space => 'e',
        }
    }

    pub fn matches(self, ch: char) -> bool {
        match self {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::Upper => ch.is_ascii_uppercase(),
            CharClass::AlphaNum => ch.is_ascii_digit() || ch.is_ascii_uppercase(),
            CharClass::Space => ch == ' ',
        }
    }
}

/// One segment of a BBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructElem {
    pub class: CharClass,
    pub length: usize,
    pub strict: bool,
}

impl StructElem {
    pub const fn strict(class: CharClass, length: usize) -> Self {
        Self {
            class,
            length,
            strict: true,
        }
    }
}

/// Ordered elements of one country's BBAN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BbanStructure {
    elements: Vec<StructElem>,
}

impl BbanStructure {
    pub fn new(elements: Vec<StructElem>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[StructElem] {
        &self.elements
    }

    /// Sum of element lengths; the BBAN length when every element is strict.
    pub fn len(&self) -> usize {
        self.elements.iter().map(|elem| elem.length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render back to the compact token form, without the country prefix.
    pub fn to_grammar(&self) -> String {
        let mut out = String::new();
        for elem in &self.elements {
            out.push_str(&elem.length.to_string());
            if elem.strict {
                out.push('!');
            }
            out.push(elem.class.letter());
        }
        out
    }
}

/// Compile a grammar string into its country code and BBAN structure.
pub fn compile(grammar: &str) -> Result<(CountryCode, BbanStructure), GrammarError> {
    let prefix = grammar
        .get(..2)
        .ok_or_else(|| GrammarError::MissingCountry(grammar.to_string()))?;
    let country =
        CountryCode::lookup(prefix).ok_or_else(|| GrammarError::UnknownCountry(prefix.to_string()))?;

    let mut elements = Vec::new();
    let mut length: usize = 0;
    let mut saw_digit = false;
    let mut strict = false;

    for (idx, ch) in grammar[2..].char_indices() {
        let pos = idx + 2;
        if let Some(digit) = ch.to_digit(10) {
            length = length
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit as usize))
                .ok_or(GrammarError::LengthOverflow(pos))?;
            saw_digit = true;
        } else if ch == '!' {
            if strict {
                return Err(GrammarError::DoubleStrict(pos));
            }
            strict = true;
        } else if let Some(class) = CharClass::from_letter(ch) {
            if length == 0 {
                return Err(GrammarError::MissingLength(pos));
            }
            elements.push(StructElem {
                class,
                length,
                strict,
            });
            length = 0;
            saw_digit = false;
            strict = false;
        } else {
            return Err(GrammarError::UnexpectedChar { ch, pos });
        }
    }

    if strict {
        return Err(GrammarError::DanglingStrict);
    }
    if saw_digit {
        return Err(GrammarError::DanglingLength);
    }

    Ok((country, BbanStructure::new(elements)))
}

//! The validation pipeline and the validated [`Iban`] value.
//!
//! Parsing runs, in order: space removal, character check, mod97-10,
//! country lookup, structure lookup, structural parse. The first failing
//! step decides the error.

use crate::checksum::mod97_10;
use crate::country::CountryCode;
use crate::error::IbanError;
use crate::registry::structure_for;
use crate::structure::parse_iban_structure;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Strip spaces. Nothing else is rewritten; lowercase input stays lowercase
/// and is rejected by the character check.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|ch| *ch != ' ').collect()
}

/// Uppercase ASCII letters and digits only.
pub fn has_valid_chars(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
}

/// The validated triple behind an [`Iban`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbanParts {
    pub country: CountryCode,
    pub check_digits: u8,
    pub bban: Vec<String>,
}

impl IbanParts {
    /// Reassemble the normalized IBAN text.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}{:02}", self.country.as_str(), self.check_digits);
        for segment in &self.bban {
            out.push_str(segment);
        }
        out
    }
}

/// Run the full pipeline and return the validated parts.
pub fn parse_parts(text: &str) -> Result<IbanParts, IbanError> {
    validate(text).map(|(_, parts)| parts)
}

fn validate(text: &str) -> Result<(String, IbanParts), IbanError> {
    let normalized = normalize(text);

    if !has_valid_chars(&normalized) {
        log::debug!("rejected {:?}: invalid characters", text);
        return Err(IbanError::InvalidCharacters);
    }

    match mod97_10(&normalized) {
        Some(1) => {}
        Some(remainder) => {
            log::debug!("rejected {normalized}: mod97 remainder {remainder}");
            return Err(IbanError::WrongChecksum);
        }
        None => unreachable!("character check admits only letters and digits"),
    }

    let prefix = normalized.get(..2).unwrap_or(normalized.as_str());
    let country = CountryCode::lookup(prefix).ok_or_else(|| {
        log::debug!("rejected {normalized}: unknown country {prefix}");
        IbanError::InvalidCountry(prefix.to_string())
    })?;

    let structure = structure_for(country)?;
    let segments = parse_iban_structure(structure, &normalized).ok_or_else(|| {
        log::debug!(
            "rejected {normalized}: BBAN does not match {}{}",
            country.as_str(),
            structure.to_grammar()
        );
        IbanError::InvalidStructure
    })?;

    let check_digits = segments
        .check_digits
        .parse::<u8>()
        .map_err(|_| IbanError::InvalidStructure)?;
    let bban = segments.bban.iter().map(|segment| segment.to_string()).collect();

    log::trace!("accepted {normalized}");
    let parts = IbanParts {
        country,
        check_digits,
        bban,
    };
    Ok((normalized, parts))
}

/// A validated IBAN, stored without spaces.
#[derive(Debug, Clone)]
pub struct Iban {
    text: String,
    country: CountryCode,
}

impl Iban {
    pub fn parse(text: &str) -> Result<Iban, IbanError> {
        let (text, parts) = validate(text)?;
        Ok(Iban {
            text,
            country: parts.country,
        })
    }

    /// The normalized form, e.g. `GB82WEST12345698765432`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_raw(&self) -> String {
        self.text.clone()
    }

    /// Groups of four separated by single spaces; the last group may be
    /// shorter.
    pub fn pretty(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + self.text.len() / 4);
        for (idx, ch) in self.text.chars().enumerate() {
            if idx > 0 && idx % 4 == 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    pub fn check_digits(&self) -> &str {
        &self.text[2..4]
    }

    pub fn bban(&self) -> &str {
        &self.text[4..]
    }
}

impl PartialEq for Iban {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Iban {}

impl std::hash::Hash for Iban {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Serialize for Iban {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Iban {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Iban::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_gb_example() {
        let iban = Iban::parse("GB82 WEST 1234 5698 7654 32").unwrap();
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");
        assert_eq!(iban.to_raw(), "GB82WEST12345698765432");
        assert_eq!(iban.pretty(), "GB82 WEST 1234 5698 7654 32");
        assert_eq!(iban.country().as_str(), "GB");
        assert_eq!(iban.check_digits(), "82");
        assert_eq!(iban.bban(), "WEST12345698765432");
    }

    #[test]
    fn pretty_groups_exact_multiples_without_trailing_space() {
        let iban = Iban::parse("NL91ABNA0417164300").unwrap();
        assert_eq!(iban.pretty(), "NL91 ABNA 0417 1643 00");
        let iban = Iban::parse("BE68539007547034").unwrap();
        assert_eq!(iban.pretty(), "BE68 5390 0754 7034");
    }

    #[test]
    fn parts_reassemble_the_normalized_text() {
        let parts = parse_parts("FR14 2004 1010 0505 0001 3M02 606").unwrap();
        assert_eq!(parts.country.as_str(), "FR");
        assert_eq!(parts.check_digits, 14);
        assert_eq!(parts.bban, vec!["20041", "01005", "0500013M026", "06"]);
        assert_eq!(parts.to_text(), "FR1420041010050500013M02606");
    }

    #[test]
    fn single_digit_check_digits_are_zero_padded() {
        let parts = IbanParts {
            country: CountryCode::lookup("GB").unwrap(),
            check_digits: 7,
            bban: vec!["WEST".to_string()],
        };
        assert_eq!(parts.to_text(), "GB07WEST");
    }

    #[test]
    fn normalize_only_strips_spaces() {
        assert_eq!(normalize(" GB82 west\t1 "), "GB82west\t1");
    }

    #[test]
    fn lowercase_input_is_invalid_characters() {
        assert_eq!(
            Iban::parse("gb82west12345698765432"),
            Err(IbanError::InvalidCharacters)
        );
    }

    #[test]
    fn tabs_and_dashes_are_invalid_characters() {
        assert_eq!(
            Iban::parse("GB82\tWEST12345698765432"),
            Err(IbanError::InvalidCharacters)
        );
        assert_eq!(
            Iban::parse("GB82-WEST-1234-5698-7654-32"),
            Err(IbanError::InvalidCharacters)
        );
    }

    #[test]
    fn short_checksum_valid_input_reports_its_prefix() {
        assert_eq!(Iban::parse("1"), Err(IbanError::InvalidCountry("1".to_string())));
        assert_eq!(Iban::parse(""), Err(IbanError::WrongChecksum));
    }

    #[test]
    fn equality_ignores_original_spacing() {
        let spaced = Iban::parse("DE89 3704 0044 0532 0130 00").unwrap();
        let compact = Iban::parse("DE89370400440532013000").unwrap();
        assert_eq!(spaced, compact);
        assert_ne!(spaced, Iban::parse("GB82WEST12345698765432").unwrap());
    }
}

//! Error types for IBAN validation and grammar compilation.

use crate::country::CountryCode;
use thiserror::Error;

/// Why a piece of text is not a valid IBAN.
///
/// Variants are reported in pipeline order: characters, checksum, country,
/// structure. When several conditions hold at once the earliest wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IbanError {
    /// Something other than ASCII uppercase letters and digits remained
    /// after spaces were stripped.
    #[error("IBAN contains invalid characters")]
    InvalidCharacters,

    /// The BBAN does not match the structure registered for its country.
    #[error("IBAN does not match the country structure")]
    InvalidStructure,

    /// mod97-10 of the normalized text is not 1.
    #[error("IBAN check digits are invalid")]
    WrongChecksum,

    /// The two-character prefix is not an IBAN-issuing country.
    #[error("IBAN country code is not recognised: {0}")]
    InvalidCountry(String),
}

/// A recognised country with no registered BBAN structure.
///
/// Never surfaced to callers; it collapses into
/// [`IbanError::InvalidStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no BBAN structure registered for {0}")]
pub struct StructureLookupFailure(pub CountryCode);

impl From<StructureLookupFailure> for IbanError {
    fn from(err: StructureLookupFailure) -> Self {
        log::error!("{err}");
        IbanError::InvalidStructure
    }
}

/// A malformed grammar string. Only the static table feeds the compiler in
/// production, so any of these is a configuration bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar is shorter than a country code: {0:?}")]
    MissingCountry(String),

    #[error("grammar country code is not recognised: {0}")]
    UnknownCountry(String),

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("strict marker repeated at position {0}")]
    DoubleStrict(usize),

    #[error("class letter without a positive length at position {0}")]
    MissingLength(usize),

    #[error("element length overflows at position {0}")]
    LengthOverflow(usize),

    #[error("grammar ends with a length but no class letter")]
    DanglingLength,

    #[error("grammar ends with a strict marker but no class letter")]
    DanglingStrict,
}

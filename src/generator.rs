//! Random, structure-conforming IBANs for demos and tests.

use crate::checksum::check_digits;
use crate::country::CountryCode;
use crate::error::IbanError;
use crate::grammar::{BbanStructure, CharClass};
use crate::iban::Iban;
use crate::registry::structure_for;
use rand::Rng;

const DIGITS: &[u8] = b"0123456789";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_from<R: Rng + ?Sized>(rng: &mut R, charset: &[u8], len: usize, out: &mut String) {
    for _ in 0..len {
        let idx = rng.gen_range(0..charset.len());
        out.push(char::from(charset[idx]));
    }
}

/// A BBAN with every element at its full length.
pub fn random_bban<R: Rng + ?Sized>(rng: &mut R, structure: &BbanStructure) -> String {
    let mut out = String::with_capacity(structure.len());
    for elem in structure.elements() {
        match elem.class {
            CharClass::Digit => random_from(rng, DIGITS, elem.length, &mut out),
            CharClass::Upper => random_from(rng, UPPER, elem.length, &mut out),
            CharClass::AlphaNum => random_from(rng, ALPHANUM, elem.length, &mut out),
            CharClass::Space => out.extend(std::iter::repeat(' ').take(elem.length)),
        }
    }
    out
}

/// A checksum-valid IBAN for `country`, validated through the pipeline.
pub fn random_iban<R: Rng + ?Sized>(rng: &mut R, country: CountryCode) -> Result<Iban, IbanError> {
    let structure = structure_for(country)?;
    let bban = random_bban(rng, structure);
    let check = check_digits(country.as_str(), &bban).ok_or(IbanError::InvalidCharacters)?;
    Iban::parse(&format!("{}{}{}", country.as_str(), check, bban))
}

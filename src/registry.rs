//! Static per-country BBAN grammars, compiled once on first use.

use crate::country::CountryCode;
use crate::error::StructureLookupFailure;
use crate::grammar::{compile, BbanStructure};
use std::collections::HashMap;
use std::sync::OnceLock;

/// (country, total IBAN length, BBAN grammar).
pub const IBAN_FORMATS: &[(&str, usize, &str)] = &[
    ("AD", 24, "AD4!n4!n12!c"),
    ("AE", 23, "AE3!n16!n"),
    ("AL", 28, "AL8!n16!c"),
    ("AT", 20, "AT5!n11!n"),
    ("AZ", 28, "AZ4!a20!c"),
    ("BA", 20, "BA3!n3!n8!n2!n"),
    ("BE", 16, "BE3!n7!n2!n"),
    ("BG", 22, "BG4!a4!n2!n8!c"),
    ("BH", 22, "BH4!a14!c"),
    ("BI", 27, "BI5!n5!n11!n2!n"),
    ("BR", 29, "BR8!n5!n10!n1!a1!c"),
    ("BY", 28, "BY4!c4!n16!c"),
    ("CH", 21, "CH5!n12!c"),
    ("CR", 22, "CR4!n14!n"),
    ("CY", 28, "CY3!n5!n16!c"),
    ("CZ", 24, "CZ4!n6!n10!n"),
    ("DE", 22, "DE8!n10!n"),
    ("DJ", 27, "DJ5!n5!n11!n2!n"),
    ("DK", 18, "DK4!n9!n1!n"),
    ("DO", 28, "DO4!c20!n"),
    ("EE", 20, "EE2!n14!n"),
    ("EG", 29, "EG4!n4!n17!n"),
    ("ES", 24, "ES4!n4!n1!n1!n10!n"),
    ("FI", 18, "FI3!n11!n"),
    ("FK", 18, "FK2!a12!n"),
    ("FO", 18, "FO4!n9!n1!n"),
    ("FR", 27, "FR5!n5!n11!c2!n"),
    ("GB", 22, "GB4!a6!n8!n"),
    ("GE", 22, "GE2!a16!n"),
    ("GI", 23, "GI4!a15!c"),
    ("GL", 18, "GL4!n9!n1!n"),
    ("GR", 27, "GR3!n4!n16!c"),
    ("GT", 28, "GT4!c20!c"),
    ("HR", 21, "HR7!n10!n"),
    ("HU", 28, "HU3!n4!n1!n15!n1!n"),
    ("IE", 22, "IE4!a6!n8!n"),
    ("IL", 23, "IL3!n3!n13!n"),
    ("IQ", 23, "IQ4!a3!n12!n"),
    ("IS", 26, "IS4!n2!n6!n10!n"),
    ("IT", 27, "IT1!a5!n5!n12!c"),
    ("JO", 30, "JO4!a4!n18!c"),
    ("KW", 30, "KW4!a22!c"),
    ("KZ", 20, "KZ3!n13!c"),
    ("LB", 28, "LB4!n20!c"),
    ("LC", 32, "LC4!a24!c"),
    ("LI", 21, "LI5!n12!c"),
    ("LT", 20, "LT5!n11!n"),
    ("LU", 20, "LU3!n13!c"),
    ("LV", 21, "LV4!a13!c"),
    ("LY", 25, "LY3!n3!n15!n"),
    ("MC", 27, "MC5!n5!n11!c2!n"),
    ("MD", 24, "MD2!c18!c"),
    ("ME", 22, "ME3!n13!n2!n"),
    ("MK", 19, "MK3!n10!c2!n"),
    ("MN", 20, "MN4!n12!n"),
    ("MR", 27, "MR5!n5!n11!n2!n"),
    ("MT", 31, "MT4!a5!n18!c"),
    ("MU", 30, "MU4!a2!n2!n12!n3!n3!a"),
    ("NI", 28, "NI4!a20!n"),
    ("NL", 18, "NL4!a10!n"),
    ("NO", 15, "NO4!n6!n1!n"),
    ("OM", 23, "OM3!n16!c"),
    ("PK", 24, "PK4!a16!c"),
    ("PL", 28, "PL8!n16!n"),
    ("PS", 29, "PS4!a21!c"),
    ("PT", 25, "PT4!n4!n11!n2!n"),
    ("QA", 29, "QA4!a21!c"),
    ("RO", 24, "RO4!a16!c"),
    ("RS", 22, "RS3!n13!n2!n"),
    ("RU", 33, "RU9!n5!n15!c"),
    ("SA", 24, "SA2!n18!c"),
    ("SC", 31, "SC4!a2!n2!n16!n3!a"),
    ("SD", 18, "SD2!n12!n"),
    ("SE", 24, "SE3!n16!n1!n"),
    ("SI", 19, "SI5!n8!n2!n"),
    ("SK", 24, "SK4!n6!n10!n"),
    ("SM", 27, "SM1!a5!n5!n12!c"),
    ("SO", 23, "SO4!n3!n12!n"),
    ("ST", 25, "ST4!n4!n11!n2!n"),
    ("SV", 28, "SV4!a20!n"),
    ("TL", 23, "TL3!n14!n2!n"),
    ("TN", 24, "TN2!n3!n13!n2!n"),
    ("TR", 26, "TR5!n1!n16!c"),
    ("UA", 29, "UA6!n19!c"),
    ("VA", 22, "VA3!n15!n"),
    ("VG", 24, "VG4!a16!n"),
    ("XK", 20, "XK4!n10!n2!n"),
];

#[derive(Debug)]
struct Entry {
    length: usize,
    structure: BbanStructure,
}

static REGISTRY: OnceLock<HashMap<CountryCode, Entry>> = OnceLock::new();

fn registry() -> &'static HashMap<CountryCode, Entry> {
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> HashMap<CountryCode, Entry> {
    let mut entries = HashMap::with_capacity(IBAN_FORMATS.len());
    for (code, length, grammar) in IBAN_FORMATS {
        let (country, structure) = match compile(grammar) {
            Ok(compiled) => compiled,
            Err(err) => panic!("invalid BBAN grammar for {code} ({grammar}): {err}"),
        };
        if country.as_str() != *code {
            panic!("BBAN grammar {grammar} is listed under {code}");
        }
        entries.insert(
            country,
            Entry {
                length: *length,
                structure,
            },
        );
    }
    log::debug!("compiled {} BBAN structures", entries.len());
    entries
}

pub fn structure_for(country: CountryCode) -> Result<&'static BbanStructure, StructureLookupFailure> {
    registry()
        .get(&country)
        .map(|entry| &entry.structure)
        .ok_or(StructureLookupFailure(country))
}

/// Expected total IBAN length for a country, check digits included.
pub fn iban_length(country: CountryCode) -> Option<usize> {
    registry().get(&country).map(|entry| entry.length)
}

/// Countries with a registered structure, alphabetically.
pub fn countries() -> Vec<CountryCode> {
    let mut codes: Vec<CountryCode> = registry().keys().copied().collect();
    codes.sort();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grammar_compiles() {
        for (code, _, grammar) in IBAN_FORMATS {
            let (country, _) = compile(grammar).unwrap_or_else(|err| panic!("{code}: {err}"));
            assert_eq!(country.as_str(), *code);
        }
    }

    #[test]
    fn structure_lengths_match_iban_lengths() {
        for country in countries() {
            let structure = structure_for(country).unwrap();
            let expected = iban_length(country).unwrap();
            assert_eq!(
                structure.len() + 4,
                expected,
                "length mismatch for {}",
                country.as_str()
            );
        }
    }

    #[test]
    fn every_country_has_a_structure() {
        for country in CountryCode::all() {
            assert!(
                structure_for(country).is_ok(),
                "missing structure for {}",
                country.as_str()
            );
        }
        assert_eq!(countries().len(), CountryCode::all().count());
    }

    #[test]
    fn registry_structures_are_strict() {
        for country in countries() {
            let structure = structure_for(country).unwrap();
            assert!(structure.elements().iter().all(|elem| elem.strict));
        }
    }

    #[test]
    fn gb_structure() {
        let gb = CountryCode::lookup("GB").unwrap();
        assert_eq!(structure_for(gb).unwrap().to_grammar(), "4!a6!n8!n");
        assert_eq!(iban_length(gb), Some(22));
    }
}

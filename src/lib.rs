//! IBAN parsing and validation.
//!
//! ```
//! use iban_parse::{Iban, IbanError};
//!
//! let iban = Iban::parse("GB82 WEST 1234 5698 7654 32").unwrap();
//! assert_eq!(iban.as_str(), "GB82WEST12345698765432");
//! assert_eq!(iban.country().as_str(), "GB");
//! assert_eq!(iban.pretty(), "GB82 WEST 1234 5698 7654 32");
//!
//! assert_eq!(Iban::parse("GB81WEST12345698765432"), Err(IbanError::WrongChecksum));
//! ```

pub mod batch;
pub mod checksum;
pub mod country;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod iban;
pub mod registry;
pub mod structure;

pub use country::CountryCode;
pub use error::{GrammarError, IbanError};
pub use grammar::{BbanStructure, CharClass, StructElem};
pub use iban::{parse_parts, Iban, IbanParts};

//! ISO 7064 mod97-10 as used by IBAN check digits.

/// Numeric value of one IBAN character and how many decimal digits it spans.
/// Lowercase letters count as their uppercase form.
fn char_value(ch: char) -> Option<(u32, u32)> {
    if let Some(digit) = ch.to_digit(10) {
        return Some((digit, 10));
    }
    if ch.is_ascii_alphabetic() {
        let value = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 10;
        return Some((value, 100));
    }
    None
}

/// Remainder in `0..97` of the text with its first four characters moved to
/// the end, letters expanded to `10..=35`.
///
/// Returns `None` if a character is neither an ASCII letter nor a digit.
pub fn mod97_10(text: &str) -> Option<u32> {
    let split = text
        .char_indices()
        .nth(4)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let (head, tail) = text.split_at(split);

    let mut remainder: u32 = 0;
    for ch in tail.chars().chain(head.chars()) {
        let (value, scale) = char_value(ch)?;
        remainder = (remainder * scale + value) % 97;
    }
    Some(remainder)
}

pub fn is_valid(text: &str) -> bool {
    mod97_10(text) == Some(1)
}

/// The two check digits that make `country + digits + bban` checksum-valid.
pub fn check_digits(country: &str, bban: &str) -> Option<String> {
    let remainder = mod97_10(&format!("{country}00{bban}"))?;
    Some(format!("{:02}", 98 - remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ibans_reduce_to_one() {
        for iban in [
            "GB82WEST12345698765432",
            "DE89370400440532013000",
            "FR1420041010050500013M02606",
            "NO9386011117947",
            "MT84MALT011000012345MTLCAST001S",
        ] {
            assert_eq!(mod97_10(iban), Some(1), "{iban}");
        }
    }

    #[test]
    fn altered_check_digit_breaks_checksum() {
        assert_eq!(mod97_10("GB81WEST12345698765432"), Some(0));
        assert_eq!(mod97_10("ZZ82WEST12345698765432"), Some(50));
    }

    #[test]
    fn lowercase_letters_count_as_uppercase() {
        assert_eq!(mod97_10("gb82west12345698765432"), Some(1));
        assert_eq!(
            mod97_10("GB82wEsT12345698765432"),
            mod97_10("GB82WEST12345698765432")
        );
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert_eq!(mod97_10("GB82WE$T12345698765432"), None);
        assert_eq!(mod97_10("GB82 WEST"), None);
    }

    #[test]
    fn short_inputs_are_not_rotated_past_their_end() {
        assert_eq!(mod97_10(""), Some(0));
        assert_eq!(mod97_10("1"), Some(1));
        assert_eq!(mod97_10("GB"), Some(59));
    }

    #[test]
    fn computes_check_digits() {
        assert_eq!(check_digits("GB", "WEST12345698765432").as_deref(), Some("82"));
        assert_eq!(check_digits("DE", "370400440532013000").as_deref(), Some("89"));
        assert_eq!(check_digits("ZZ", "WEST12345698765432").as_deref(), Some("33"));
        assert_eq!(check_digits("GB", "WE$T").as_deref(), None);
    }
}

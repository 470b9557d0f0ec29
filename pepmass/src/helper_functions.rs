/// Build a formula from a constant definition against the built-in periodic table. Only use this
/// for definitions that are part of this crate, these are checked by the unit tests.
macro_rules! builtin_formula {
    ($text:literal) => {
        $crate::chemistry::ChemicalFormula::parse_with(
            $text,
            &$crate::chemistry::PeriodicTable::builtin(),
        )
        .expect(concat!("Invalid built-in formula: ", $text))
    };
}

/// Find the enclosed text by the given symbols, assumes a single open is already read just
/// before the start, guarantees to only pick full characters
pub(crate) fn end_of_enclosure(text: &str, start: usize, open: u8, close: u8) -> Option<usize> {
    let mut state = 1;
    for (i, ch) in text.as_bytes()[start..].iter().enumerate() {
        // Check if this byte is a full character (is_char_boundary also works on index==len)
        if text.is_char_boundary(start + i) && text.is_char_boundary(start + i + 1) {
            if *ch == open {
                state += 1;
            } else if *ch == close {
                state -= 1;
                if state == 0 {
                    return Some(start + i);
                }
            }
        }
    }
    None
}

/// Get the length in bytes of the signed integer at the start of the given bytes (`-12`, `+3`, `4`).
/// Returns zero if there is no number.
pub(crate) fn signed_number_length(bytes: &[u8]) -> usize {
    let sign = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let digits = bytes[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 { 0 } else { sign + digits }
}

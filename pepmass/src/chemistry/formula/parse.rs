use std::str::FromStr;

use crate::{
    chemistry::{ChemicalFormula, PeriodicTable, registry},
    error::{MassError, ParseKind},
    helper_functions::signed_number_length,
};

impl ChemicalFormula {
    /// Parse a formula against the active periodic table (see [`registry`]). The grammar is a
    /// list of tokens `Symbol[{MassNumber}][Count]`, in any order and optionally separated by
    /// whitespace. The symbol is an uppercase letter followed by any number of lowercase letters,
    /// the mass number selects a specific isotope (the principal isotope if left out) and the
    /// count is a signed integer (one if left out). Repeated tokens for the same isotope add up.
    /// ```rust
    /// use pepmass::prelude::*;
    /// let water_loss = ChemicalFormula::parse("H-2O-1").unwrap();
    /// assert_eq!(water_loss.atom_count(), -3);
    /// let labelled = ChemicalFormula::parse("C{13}6 H12 O6").unwrap();
    /// assert_eq!(labelled.count(("C", 13)), 6);
    /// assert!(ChemicalFormula::parse("Xx2").is_err());
    /// ```
    /// # Errors
    /// * [`MassError::Parse`] if the text does not follow the grammar.
    /// * [`MassError::NotFound`] if a symbol or mass number is not in the active table.
    pub fn parse(text: &str) -> Result<Self, MassError> {
        Self::parse_with(text, &registry::active())
    }

    /// Parse a formula against the given periodic table, see [`Self::parse`] for the grammar.
    /// # Errors
    /// * [`MassError::Parse`] if the text does not follow the grammar, or if the total count of
    ///   an isotope does not fit in an `i32`.
    /// * [`MassError::NotFound`] if a symbol or mass number is not in the table.
    pub fn parse_with(text: &str, table: &PeriodicTable) -> Result<Self, MassError> {
        let bytes = text.as_bytes();
        let mut formula = Self::default();
        let mut index = 0;
        while index < bytes.len() {
            if bytes[index].is_ascii_whitespace() {
                index += 1;
                continue;
            }
            if !bytes[index].is_ascii_uppercase() {
                return Err(unexpected(text, index, "an element symbol"));
            }
            let symbol_start = index;
            index += 1;
            while index < bytes.len() && bytes[index].is_ascii_lowercase() {
                index += 1;
            }
            let symbol = &text[symbol_start..index];

            let mut mass_number = None;
            if bytes.get(index) == Some(&b'{') {
                let digits = bytes[index + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                let close = index + 1 + digits;
                if digits == 0 || bytes.get(close) != Some(&b'}') {
                    return Err(MassError::parse(
                        ParseKind::Formula,
                        index,
                        "An isotope should be written as a mass number within braces, eg 'C{13}'",
                    ));
                }
                mass_number = Some(text[index + 1..close].parse::<u16>().map_err(|err| {
                    MassError::parse(
                        ParseKind::Formula,
                        index + 1,
                        format!("Invalid mass number: {err}"),
                    )
                })?);
                index = close + 1;
            }

            let length = signed_number_length(&bytes[index..]);
            let count = if length == 0 {
                if matches!(bytes.get(index), Some(b'-' | b'+')) {
                    return Err(unexpected(text, index + 1, "a number after the sign"));
                }
                1
            } else {
                text[index..index + length]
                    .trim_start_matches('+')
                    .parse::<i32>()
                    .map_err(|err| {
                        MassError::parse(
                            ParseKind::Formula,
                            index,
                            format!("Invalid element count: {err}"),
                        )
                    })?
            };
            index += length;

            let isotope = table.isotope(symbol, mass_number)?;
            if formula.checked_add_isotope(&isotope, count).is_none() {
                return Err(MassError::parse(
                    ParseKind::Formula,
                    symbol_start,
                    format!("The total count for '{symbol}' does not fit in a 32 bit integer"),
                ));
            }
        }
        Ok(formula)
    }
}

fn unexpected(text: &str, index: usize, expected: &str) -> MassError {
    MassError::parse(
        ParseKind::Formula,
        index,
        text[index..].chars().next().map_or_else(
            || format!("Unexpected end of formula, expected {expected}"),
            |c| format!("Unexpected character '{c}', expected {expected}"),
        ),
    )
}

impl FromStr for ChemicalFormula {
    type Err = MassError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

use thiserror::Error;

/// The kind of thing that could not be found in a lookup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LookupKind {
    /// An element symbol in the active periodic table
    Element,
    /// A mass number of a known element
    Isotope,
    /// An amino acid by code or name
    AminoAcid,
    /// A named modification
    Modification,
    /// A named protease
    Protease,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Element => "element",
                Self::Isotope => "isotope",
                Self::AminoAcid => "amino acid",
                Self::Modification => "modification",
                Self::Protease => "protease",
            }
        )
    }
}

/// The kind of text that failed to parse.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParseKind {
    /// A chemical formula (`C2H3NO`)
    Formula,
    /// An amino acid sequence with inline modifications
    Sequence,
    /// A tolerance (`10 ppm`)
    Tolerance,
    /// A periodic table description
    PeriodicTable,
}

impl std::fmt::Display for ParseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Formula => "chemical formula",
                Self::Sequence => "sequence",
                Self::Tolerance => "tolerance",
                Self::PeriodicTable => "periodic table",
            }
        )
    }
}

/// Any error that can be returned by this crate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MassError {
    /// A lookup by symbol, mass number, code or name did not match anything.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was looked up
        kind: LookupKind,
        /// The name, symbol or code that was not found
        name: String,
    },
    /// An index or parameter outside of its valid (inclusive) range.
    #[error("{what} {value} is out of range, it should be within {min}..={max}")]
    OutOfRange {
        /// The name of the index or parameter
        what: &'static str,
        /// The offending value
        value: usize,
        /// The lowest valid value
        min: usize,
        /// The highest valid value
        max: usize,
    },
    /// An argument that is not valid for this operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Text that does not follow the expected grammar.
    #[error("invalid {kind} at position {position}: {reason}")]
    Parse {
        /// The grammar that was being parsed
        kind: ParseKind,
        /// The byte offset into the text where the problem was found
        position: usize,
        /// What went wrong
        reason: String,
    },
    /// A conversion between mass and m/z with a charge of zero.
    #[error("Charge cannot be zero")]
    ZeroCharge,
}

impl MassError {
    pub(crate) fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn parse(kind: ParseKind, position: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            position,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(MassError::ZeroCharge.to_string(), "Charge cannot be zero");
        assert_eq!(
            MassError::not_found(LookupKind::Element, "Xx").to_string(),
            "element 'Xx' not found"
        );
        assert_eq!(
            MassError::OutOfRange {
                what: "fragment number",
                value: 5,
                min: 1,
                max: 4
            }
            .to_string(),
            "fragment number 5 is out of range, it should be within 1..=4"
        );
    }
}

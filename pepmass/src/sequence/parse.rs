use std::str::FromStr;

use crate::{
    error::{MassError, ParseKind},
    helper_functions::end_of_enclosure,
    sequence::{AminoAcid, AminoAcidPolymer, Modification},
};

impl AminoAcidPolymer {
    /// Parse a sequence with inline modifications. Residues are written as one letter codes, a
    /// modification in brackets directly follows the residue it is placed on. Terminal
    /// modifications are separated from the sequence with a dash. Multiple modifications on the
    /// same place are written as consecutive brackets.
    ///
    /// `[Acetyl]-PEM[Oxidation]S[Phospho][Methyl]TIDE-[Amidated]`
    ///
    /// The text in brackets is resolved with [`Modification::resolve`]: a known modification
    /// name, a signed mass (`[+15.9949]`) or a chemical formula (`[O]`).
    /// # Errors
    /// * [`MassError::Parse`] if the text does not follow this grammar.
    /// * [`MassError::NotFound`] if a residue or modification is not known.
    pub fn parse(text: &str) -> Result<Self, MassError> {
        let bytes = text.as_bytes();
        let mut index = 0;
        let mut n_term = None;
        let mut c_term = None;

        // N terminal modifications: one or more brackets followed by a dash
        if bytes.first() == Some(&b'[') {
            let mut list = Vec::new();
            while bytes.get(index) == Some(&b'[') {
                let (modification, next) = parse_bracket(text, index)?;
                list.push(modification);
                index = next;
            }
            if bytes.get(index) != Some(&b'-') {
                return Err(MassError::parse(
                    ParseKind::Sequence,
                    index,
                    "A modification before the first residue should be followed by a dash",
                ));
            }
            index += 1;
            n_term = Some(combine(list));
        }

        let mut residues = Vec::new();
        let mut modifications = Vec::new();
        while index < bytes.len() {
            match bytes[index] {
                b'[' => {
                    if residues.is_empty() {
                        return Err(MassError::parse(
                            ParseKind::Sequence,
                            index,
                            "A modification needs a residue to be placed on",
                        ));
                    }
                    let (modification, next) = parse_bracket(text, index)?;
                    modifications.push((residues.len(), modification));
                    index = next;
                }
                b'-' => {
                    index += 1;
                    let mut list = Vec::new();
                    while bytes.get(index) == Some(&b'[') {
                        let (modification, next) = parse_bracket(text, index)?;
                        list.push(modification);
                        index = next;
                    }
                    if list.is_empty() || index != bytes.len() {
                        return Err(MassError::parse(
                            ParseKind::Sequence,
                            index,
                            "A dash after the sequence should be followed by the C terminal modification and nothing else",
                        ));
                    }
                    c_term = Some(combine(list));
                }
                b if b.is_ascii_alphabetic() => {
                    residues.push(AminoAcid::try_from(b)?);
                    index += 1;
                }
                _ => {
                    return Err(MassError::parse(
                        ParseKind::Sequence,
                        index,
                        text[index..].chars().next().map_or_else(String::new, |c| {
                            format!("Unexpected character '{c}'")
                        }),
                    ));
                }
            }
        }

        let mut polymer = Self::new(residues);
        if let Some(modification) = n_term {
            polymer.set_n_term_modification(modification);
        }
        if let Some(modification) = c_term {
            polymer.set_c_term_modification(modification);
        }
        for (position, modification) in modifications {
            polymer.add_modification(position, modification)?;
        }
        Ok(polymer)
    }
}

/// Parse the modification in the brackets starting at `start`, returns the index after the
/// closing bracket.
fn parse_bracket(text: &str, start: usize) -> Result<(Modification, usize), MassError> {
    let end = end_of_enclosure(text, start + 1, b'[', b']').ok_or_else(|| {
        MassError::parse(ParseKind::Sequence, start, "Unclosed modification bracket")
    })?;
    let content = &text[start + 1..end];
    if content.trim().is_empty() {
        return Err(MassError::parse(
            ParseKind::Sequence,
            start,
            "Empty modification",
        ));
    }
    Ok((Modification::resolve(content)?, end + 1))
}

fn combine(modifications: Vec<Modification>) -> Modification {
    modifications
        .into_iter()
        .reduce(Modification::merge)
        .unwrap_or(Modification::Collection(Vec::new()))
}

impl FromStr for AminoAcidPolymer {
    type Err = MassError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

use std::{collections::BTreeMap, fmt::Display, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    chemistry::ChemicalFormula,
    error::MassError,
    quantities::{Mass, MassMode},
    sequence::{AminoAcid, Modification, ModificationSites},
    system::{Charge, MassOverCharge},
};

static FREE_AMINE: LazyLock<ChemicalFormula> = LazyLock::new(|| builtin_formula!("H"));
static FREE_ACID: LazyLock<ChemicalFormula> = LazyLock::new(|| builtin_formula!("OH"));

/// A linear chain of amino acids, with a modification slot at both termini and at most one
/// modification per residue (which can be a [`Modification::Collection`]).
///
/// Positions in the public API are 1-based: the first residue is position 1 and the last residue
/// is position [`Self::len`].
///
/// ```rust
/// use pepmass::prelude::*;
/// let peptide = AminoAcidPolymer::parse("PEPTM[Oxidation]IDE").unwrap();
/// assert_eq!(peptide.len(), 8);
/// assert_eq!(peptide.sequence(), "PEPTMIDE");
/// assert_eq!(peptide.residue(5).unwrap(), AminoAcid::Methionine);
/// assert!(peptide.modification(5).unwrap().is_some());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AminoAcidPolymer {
    residues: Vec<AminoAcid>,
    /// The chemical group that closes the N terminus, a free amine (H) by default
    n_terminus: ChemicalFormula,
    /// The chemical group that closes the C terminus, a free acid (OH) by default
    c_terminus: ChemicalFormula,
    n_term_modification: Option<Modification>,
    c_term_modification: Option<Modification>,
    /// Sparse, keyed on the 0-based residue index
    modifications: BTreeMap<usize, Modification>,
}

impl AminoAcidPolymer {
    /// Create an unmodified polymer with free termini
    pub fn new(residues: impl IntoIterator<Item = AminoAcid>) -> Self {
        Self {
            residues: residues.into_iter().collect(),
            n_terminus: FREE_AMINE.clone(),
            c_terminus: FREE_ACID.clone(),
            n_term_modification: None,
            c_term_modification: None,
            modifications: BTreeMap::new(),
        }
    }

    /// The number of residues
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// If there are no residues
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// All residues in order
    pub fn residues(&self) -> &[AminoAcid] {
        &self.residues
    }

    /// The plain residue sequence as one letter codes, without modifications
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|aa| aa.one_letter_code()).collect()
    }

    /// Check a 1-based position and get the 0-based index
    fn index(&self, position: usize) -> Result<usize, MassError> {
        if position == 0 || position > self.len() {
            Err(MassError::OutOfRange {
                what: "residue position",
                value: position,
                min: 1,
                max: self.len(),
            })
        } else {
            Ok(position - 1)
        }
    }

    /// The residue at the given 1-based position.
    /// # Errors
    /// If the position is not within `1..=len`.
    pub fn residue(&self, position: usize) -> Result<AminoAcid, MassError> {
        Ok(self.residues[self.index(position)?])
    }

    /// The number of times this residue occurs
    pub fn residue_count(&self, amino_acid: AminoAcid) -> usize {
        self.residues.iter().filter(|aa| **aa == amino_acid).count()
    }

    /// If this residue occurs at least once
    pub fn contains_residue(&self, amino_acid: AminoAcid) -> bool {
        self.residues.contains(&amino_acid)
    }

    /// The modification at the given 1-based position.
    /// # Errors
    /// If the position is not within `1..=len`.
    pub fn modification(&self, position: usize) -> Result<Option<&Modification>, MassError> {
        Ok(self.modifications.get(&self.index(position)?))
    }

    /// All residue modifications with their 1-based position, in order
    pub fn modifications(&self) -> impl Iterator<Item = (usize, &Modification)> + '_ {
        self.modifications.iter().map(|(i, m)| (i + 1, m))
    }

    /// Place a modification on the residue at the given 1-based position, replacing whatever
    /// was there. Returns the replaced modification.
    /// # Errors
    /// If the position is not within `1..=len`.
    pub fn set_modification(
        &mut self,
        position: usize,
        modification: Modification,
    ) -> Result<Option<Modification>, MassError> {
        let index = self.index(position)?;
        Ok(self.modifications.insert(index, modification))
    }

    /// Stack a modification on the residue at the given 1-based position, if there already is a
    /// modification both are kept as a [`Modification::Collection`].
    /// # Errors
    /// If the position is not within `1..=len`.
    pub fn add_modification(
        &mut self,
        position: usize,
        modification: Modification,
    ) -> Result<(), MassError> {
        let index = self.index(position)?;
        let merged = match self.modifications.remove(&index) {
            Some(existing) => existing.merge(modification),
            None => modification,
        };
        self.modifications.insert(index, merged);
        Ok(())
    }

    /// Remove the modification from the residue at the given 1-based position and return it.
    /// # Errors
    /// If the position is not within `1..=len`.
    pub fn remove_modification(
        &mut self,
        position: usize,
    ) -> Result<Option<Modification>, MassError> {
        let index = self.index(position)?;
        Ok(self.modifications.remove(&index))
    }

    /// Place the modification on every residue in the set of sites, and on the termini if these
    /// are in the set. Existing modifications on these places are replaced. Returns the number of
    /// places that were modified.
    pub fn set_modifications_at_sites(
        &mut self,
        modification: &Modification,
        sites: ModificationSites,
    ) -> usize {
        let mut count = 0;
        for (index, aa) in self.residues.iter().enumerate() {
            if sites.contains_residue(*aa) {
                self.modifications.insert(index, modification.clone());
                count += 1;
            }
        }
        if sites.contains(ModificationSites::N_TERM) {
            self.n_term_modification = Some(modification.clone());
            count += 1;
        }
        if sites.contains(ModificationSites::C_TERM) {
            self.c_term_modification = Some(modification.clone());
            count += 1;
        }
        count
    }

    /// Place the modification on every occurrence of the residue. Returns the number of residues
    /// that were modified.
    pub fn set_modifications_for_residue(
        &mut self,
        modification: &Modification,
        amino_acid: AminoAcid,
    ) -> usize {
        self.set_modifications_at_sites(modification, amino_acid.site())
    }

    /// Remove all modifications, on residues and termini. The terminal groups are kept.
    pub fn clear_modifications(&mut self) {
        self.modifications.clear();
        self.n_term_modification = None;
        self.c_term_modification = None;
    }

    /// The N terminal modification
    pub const fn n_term_modification(&self) -> Option<&Modification> {
        self.n_term_modification.as_ref()
    }

    /// The C terminal modification
    pub const fn c_term_modification(&self) -> Option<&Modification> {
        self.c_term_modification.as_ref()
    }

    /// Set the N terminal modification, returns the previous one
    pub fn set_n_term_modification(
        &mut self,
        modification: Modification,
    ) -> Option<Modification> {
        self.n_term_modification.replace(modification)
    }

    /// Set the C terminal modification, returns the previous one
    pub fn set_c_term_modification(
        &mut self,
        modification: Modification,
    ) -> Option<Modification> {
        self.c_term_modification.replace(modification)
    }

    /// Remove the N terminal modification, returns the previous one
    pub fn clear_n_term_modification(&mut self) -> Option<Modification> {
        self.n_term_modification.take()
    }

    /// Remove the C terminal modification, returns the previous one
    pub fn clear_c_term_modification(&mut self) -> Option<Modification> {
        self.c_term_modification.take()
    }

    /// The group closing the N terminus
    pub const fn n_terminus(&self) -> &ChemicalFormula {
        &self.n_terminus
    }

    /// The group closing the C terminus
    pub const fn c_terminus(&self) -> &ChemicalFormula {
        &self.c_terminus
    }

    /// Replace the group closing the N terminus (`H` by default)
    pub fn set_n_terminus(&mut self, formula: ChemicalFormula) {
        self.n_terminus = formula;
    }

    /// Replace the group closing the C terminus (`OH` by default)
    pub fn set_c_terminus(&mut self, formula: ChemicalFormula) {
        self.c_terminus = formula;
    }

    /// The mass of the N terminus: the terminal group with its modification
    pub(crate) fn n_term_mass(&self) -> Mass {
        self.n_terminus.mass()
            + self
                .n_term_modification
                .as_ref()
                .map(Modification::mass)
                .unwrap_or_default()
    }

    /// The mass of the C terminus: the terminal group with its modification
    pub(crate) fn c_term_mass(&self) -> Mass {
        self.c_terminus.mass()
            + self
                .c_term_modification
                .as_ref()
                .map(Modification::mass)
                .unwrap_or_default()
    }

    /// The summed mass of the residues in the 0-based index range, including their modifications
    pub(crate) fn residue_range_mass(&self, range: std::ops::Range<usize>) -> Mass {
        self.residues[range.clone()]
            .iter()
            .map(|aa| aa.residue_mass())
            .sum::<Mass>()
            + self
                .modifications
                .range(range)
                .map(|(_, m)| m.mass())
                .sum::<Mass>()
    }

    /// The formula of the N terminus, `None` if the modification has no known formula
    pub(crate) fn n_term_formula(&self) -> Option<ChemicalFormula> {
        let modification = match &self.n_term_modification {
            Some(m) => m.formula()?,
            None => ChemicalFormula::default(),
        };
        Some(&self.n_terminus + &modification)
    }

    /// The formula of the C terminus, `None` if the modification has no known formula
    pub(crate) fn c_term_formula(&self) -> Option<ChemicalFormula> {
        let modification = match &self.c_term_modification {
            Some(m) => m.formula()?,
            None => ChemicalFormula::default(),
        };
        Some(&self.c_terminus + &modification)
    }

    /// The summed formula of the residues in the 0-based index range, `None` if any of the
    /// modifications in the range has no known formula
    pub(crate) fn residue_range_formula(
        &self,
        range: std::ops::Range<usize>,
    ) -> Option<ChemicalFormula> {
        let mut formula: ChemicalFormula =
            self.residues[range.clone()].iter().map(|aa| aa.formula()).sum();
        for (_, modification) in self.modifications.range(range) {
            formula += modification.formula()?;
        }
        Some(formula)
    }

    /// The mass of the whole molecule: all residues, both terminal groups and all modifications.
    /// ```rust
    /// use pepmass::prelude::*;
    /// let glycine = AminoAcidPolymer::parse("G").unwrap();
    /// let mass = glycine.mass().monoisotopic();
    /// assert!((mass.get::<pepmass::system::dalton>() - 75.032_028).abs() < 1e-6);
    /// ```
    pub fn mass(&self) -> Mass {
        self.n_term_mass() + self.residue_range_mass(0..self.len()) + self.c_term_mass()
    }

    /// The m/z of the whole molecule at the given charge, based on either mass.
    /// # Errors
    /// If the charge is zero.
    pub fn mz(&self, charge: Charge, mode: MassMode) -> Result<MassOverCharge, MassError> {
        self.mass().to_mz(charge, mode)
    }

    /// The elemental composition of the whole molecule, `None` if any of the modifications has no
    /// known formula (eg a modification only defined by its mass).
    pub fn formula(&self) -> Option<ChemicalFormula> {
        Some(
            self.n_term_formula()?
                + self.residue_range_formula(0..self.len())?
                + self.c_term_formula()?,
        )
    }

    /// Copy the residues from `start` to `end` (1-based, inclusive) into a new polymer. Only the
    /// modifications on these residues are copied, moved to their new positions. The N terminal
    /// group and modification are only copied if `start` is the first residue, the C terminal
    /// group and modification only if `end` is the last residue, the new termini are free
    /// otherwise.
    /// # Errors
    /// If `start` or `end` is not within `1..=len`, or if `start > end`.
    pub fn sub_polymer(&self, start: usize, end: usize) -> Result<Self, MassError> {
        let first = self.index(start)?;
        let last = self.index(end)?;
        if first > last {
            return Err(MassError::OutOfRange {
                what: "start position",
                value: start,
                min: 1,
                max: end,
            });
        }
        let at_n_term = first == 0;
        let at_c_term = last == self.len() - 1;
        Ok(Self {
            residues: self.residues[first..=last].to_vec(),
            n_terminus: if at_n_term {
                self.n_terminus.clone()
            } else {
                FREE_AMINE.clone()
            },
            c_terminus: if at_c_term {
                self.c_terminus.clone()
            } else {
                FREE_ACID.clone()
            },
            n_term_modification: self.n_term_modification.clone().filter(|_| at_n_term),
            c_term_modification: self.c_term_modification.clone().filter(|_| at_c_term),
            modifications: self
                .modifications
                .range(first..=last)
                .map(|(i, m)| (i - first, m.clone()))
                .collect(),
        })
    }
}

/// Written in the inline notation that [`AminoAcidPolymer::parse`] reads:
/// `[Acetyl]-PEM[Oxidation]TIDE-[Amidated]`. The terminal groups are not written.
///
/// Not every polymer survives a round trip through this text. A [`Modification::ChannelSet`] is
/// written as `[name]`, which parsing does not resolve back into the set of channels. An empty
/// [`Modification::Collection`] writes nothing, so the parsed polymer has no modification there.
impl Display for AminoAcidPolymer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(modification) = &self.n_term_modification
            && !modification.parts().is_empty()
        {
            for part in modification.parts() {
                write!(f, "[{part}]")?;
            }
            write!(f, "-")?;
        }
        for (index, aa) in self.residues.iter().enumerate() {
            write!(f, "{aa}")?;
            if let Some(modification) = self.modifications.get(&index) {
                for part in modification.parts() {
                    write!(f, "[{part}]")?;
                }
            }
        }
        if let Some(modification) = &self.c_term_modification
            && !modification.parts().is_empty()
        {
            write!(f, "-")?;
            for part in modification.parts() {
                write!(f, "[{part}]")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::{
        chemistry::PeriodicTable,
        sequence::ChannelSet,
        system::{self, dalton},
    };

    fn formula(text: &str) -> ChemicalFormula {
        ChemicalFormula::parse_with(text, &PeriodicTable::builtin()).unwrap()
    }

    fn close(a: system::Mass, b: system::Mass, limit: f64) -> bool {
        (a - b).abs().get::<dalton>() < limit
    }

    #[test]
    fn positions() {
        let mut polymer = AminoAcidPolymer::parse("ACDK").unwrap();
        assert_eq!(polymer.residue(1).unwrap(), AminoAcid::Alanine);
        assert_eq!(polymer.residue(4).unwrap(), AminoAcid::Lysine);
        assert_eq!(
            polymer.residue(0).unwrap_err(),
            MassError::OutOfRange {
                what: "residue position",
                value: 0,
                min: 1,
                max: 4
            }
        );
        assert!(polymer.residue(5).is_err());
        assert!(
            polymer
                .set_modification(5, Modification::named("Oxidation").unwrap())
                .is_err()
        );
        assert_eq!(polymer.residue_count(AminoAcid::Cysteine), 1);
        assert!(!polymer.contains_residue(AminoAcid::Tryptophan));
    }

    #[test]
    fn masses() {
        let mut polymer = AminoAcidPolymer::parse("GG").unwrap();
        // Diglycine C4H8N2O3
        let diglycine = formula("C4H8N2O3");
        assert!(close(polymer.mass().monoisotopic(), diglycine.monoisotopic_mass(), 1e-9));
        assert_eq!(polymer.formula().unwrap(), formula("C4H8N2O3"));
        let unmodified = polymer.mass();
        let methyl = Modification::named("Methyl").unwrap();
        polymer.set_modification(2, methyl.clone()).unwrap();
        polymer.set_n_term_modification(Modification::named("Acetyl").unwrap());
        assert!(close(
            polymer.mass().monoisotopic() - unmodified.monoisotopic(),
            methyl.mass().monoisotopic() + formula("C2H2O").monoisotopic_mass(),
            1e-9
        ));
        assert_eq!(polymer.formula().unwrap(), formula("C7H12N2O4"));
        polymer.add_modification(1, Modification::resolve("+10").unwrap()).unwrap();
        assert_eq!(polymer.formula(), None);
        let mz = polymer.mz(Charge::new(2), MassMode::Monoisotopic).unwrap();
        let expected = polymer.mass().monoisotopic().get::<dalton>() / 2.0 + 1.007_276_466_812;
        assert!((mz.value() - expected).abs() < 1e-9);
        assert_eq!(
            polymer.mz(Charge::new(0), MassMode::Average),
            Err(MassError::ZeroCharge)
        );
        polymer.clear_modifications();
        assert_eq!(polymer.mass(), unmodified);
    }

    #[test]
    fn terminal_groups() {
        let mut polymer = AminoAcidPolymer::parse("GG").unwrap();
        let free = polymer.mass();
        polymer.set_c_terminus(formula("NH2"));
        let difference = free.monoisotopic() - polymer.mass().monoisotopic();
        assert!((difference.get::<dalton>() - 0.984_016).abs() < 1e-6);
        assert_eq!(polymer.c_terminus(), &formula("NH2"));
        assert_eq!(polymer.n_terminus(), &formula("H"));
    }

    #[test]
    fn sites() {
        let mut polymer = AminoAcidPolymer::parse("MKSTMK").unwrap();
        let oxidation = Modification::named("Oxidation").unwrap();
        assert_eq!(
            polymer.set_modifications_for_residue(&oxidation, AminoAcid::Methionine),
            2
        );
        assert_eq!(polymer.modification(1).unwrap(), Some(&oxidation));
        assert_eq!(polymer.modification(5).unwrap(), Some(&oxidation));
        let acetyl = Modification::named("Acetyl").unwrap();
        assert_eq!(
            polymer.set_modifications_at_sites(&acetyl, acetyl.sites()),
            3
        );
        assert_eq!(polymer.n_term_modification(), Some(&acetyl));
        assert_eq!(polymer.c_term_modification(), None);
        assert_eq!(polymer.modifications().count(), 4);
        assert_eq!(polymer.remove_modification(2).unwrap(), Some(acetyl.clone()));
        assert_eq!(polymer.modification(2).unwrap(), None);
        assert_eq!(polymer.clear_n_term_modification(), Some(acetyl));
        assert_eq!(polymer.to_string(), "M[Oxidation]KSTM[Oxidation]K[Acetyl]");
    }

    #[test]
    fn stacked_modifications() {
        let mut polymer = AminoAcidPolymer::parse("PEPTIDE").unwrap();
        polymer
            .add_modification(4, Modification::named("Phospho").unwrap())
            .unwrap();
        polymer
            .add_modification(4, Modification::named("Methyl").unwrap())
            .unwrap();
        assert_eq!(polymer.to_string(), "PEPT[Phospho][Methyl]IDE");
        assert!(matches!(
            polymer.modification(4).unwrap(),
            Some(Modification::Collection(list)) if list.len() == 2
        ));
    }

    #[test]
    fn text_without_round_trip() {
        let mut polymer = AminoAcidPolymer::parse("GG").unwrap();
        polymer
            .set_modification(1, ChannelSet::new("Labels").into())
            .unwrap();
        polymer.set_n_term_modification(Modification::Collection(Vec::new()));
        polymer.set_c_term_modification(Modification::Collection(Vec::new()));
        let text = polymer.to_string();
        assert_eq!(text, "G[Labels]G");
        assert_ne!(AminoAcidPolymer::parse(&text).ok(), Some(polymer));
    }

    #[test]
    fn partial_copies() {
        let mut polymer = AminoAcidPolymer::parse("[Acetyl]-ACMKE-[Amidated]").unwrap();
        polymer
            .set_modification(3, Modification::named("Oxidation").unwrap())
            .unwrap();

        let middle = polymer.sub_polymer(2, 4).unwrap();
        assert_eq!(middle.sequence(), "CMK");
        assert_eq!(
            middle.modification(2).unwrap(),
            Some(&Modification::named("Oxidation").unwrap())
        );
        assert_eq!(middle.n_term_modification(), None);
        assert_eq!(middle.c_term_modification(), None);
        assert_eq!(middle.to_string(), "CM[Oxidation]K");

        let end = polymer.sub_polymer(2, 5).unwrap();
        assert_eq!(
            end.c_term_modification(),
            Some(&Modification::named("Amidated").unwrap())
        );
        assert_eq!(end.n_term_modification(), None);

        let start = polymer.sub_polymer(1, 2).unwrap();
        assert_eq!(start.to_string(), "[Acetyl]-AC");
        assert_eq!(polymer.sub_polymer(1, 5).unwrap(), polymer);

        assert!(polymer.sub_polymer(0, 2).is_err());
        assert!(polymer.sub_polymer(2, 6).is_err());
        assert!(matches!(
            polymer.sub_polymer(3, 2),
            Err(MassError::OutOfRange { .. })
        ));
    }
}

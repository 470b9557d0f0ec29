use std::{
    collections::BTreeMap,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use crate::chemistry::{Isotope, formula::FormulaSelector};

/// A chemical formula, a count for every isotope it contains. Isotope counts are signed so that
/// formulas can describe differences (eg the loss of water: `H-2O-1`). Isotopes with a count of
/// zero are never stored.
///
/// ```rust
/// use pepmass::prelude::*;
/// let glycine = ChemicalFormula::parse("C2H3NO").unwrap();
/// // The order of the tokens does not matter
/// assert_eq!(glycine, ChemicalFormula::parse("NC2OH3").unwrap());
/// // Specific isotopes are selected with their mass number
/// assert_ne!(glycine, ChemicalFormula::parse("CC{13}H3NO").unwrap());
/// assert_eq!(glycine.atom_count(), 7);
/// assert_eq!(glycine.element_count(), 4);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ChemicalFormula {
    pub(super) isotopes: BTreeMap<Isotope, i32>,
}

impl ChemicalFormula {
    /// Create an empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the given number of atoms of this isotope, a negative count removes atoms. The
    /// resulting count saturates at the bounds of `i32`, use
    /// [`Self::checked_add_isotope`] to detect that.
    pub fn add_isotope(&mut self, isotope: &Isotope, count: i32) {
        self.update_isotope(isotope, count, i32::saturating_add);
    }

    /// Add the given number of atoms of this isotope, returning the new count. If the new count
    /// would not fit in an `i32` this returns `None` and leaves the formula untouched.
    /// ```rust
    /// use pepmass::prelude::*;
    /// let mut formula = ChemicalFormula::parse("H2").unwrap();
    /// let hydrogen = formula.iter().next().unwrap().0.clone();
    /// assert_eq!(formula.checked_add_isotope(&hydrogen, 3), Some(5));
    /// assert_eq!(formula.checked_add_isotope(&hydrogen, i32::MAX), None);
    /// assert_eq!(formula.count("H"), 5);
    /// ```
    pub fn checked_add_isotope(&mut self, isotope: &Isotope, count: i32) -> Option<i32> {
        let current = self.isotopes.get(isotope).copied().unwrap_or_default();
        let total = current.checked_add(count)?;
        self.update_isotope(isotope, count, |_, _| total);
        Some(total)
    }

    fn update_isotope(
        &mut self,
        isotope: &Isotope,
        count: i32,
        combine: impl Fn(i32, i32) -> i32,
    ) {
        if count == 0 {
            return;
        }
        if let Some(existing) = self.isotopes.get_mut(isotope) {
            *existing = combine(*existing, count);
            if *existing == 0 {
                self.isotopes.remove(isotope);
            }
        } else {
            self.isotopes.insert(isotope.clone(), count);
        }
    }

    /// Remove the given number of atoms of this isotope, saturating like [`Self::add_isotope`].
    pub fn remove_isotope(&mut self, isotope: &Isotope, count: i32) {
        self.add_isotope(isotope, count.saturating_neg());
    }

    /// Merge all isotope counts of the other formula into this formula.
    pub fn add_formula(&mut self, other: &Self) {
        for (isotope, count) in &other.isotopes {
            self.add_isotope(isotope, *count);
        }
    }

    /// Subtract all isotope counts of the other formula from this formula.
    pub fn remove_formula(&mut self, other: &Self) {
        for (isotope, count) in &other.isotopes {
            self.add_isotope(isotope, count.saturating_neg());
        }
    }

    /// Remove all isotopes
    pub fn clear(&mut self) {
        self.isotopes.clear();
    }

    /// The number of atoms matching the selector, see [`FormulaSelector`] for all options.
    /// ```rust
    /// use pepmass::prelude::*;
    /// let formula = ChemicalFormula::parse("C{13}4C10N{15}N2O2H25").unwrap();
    /// assert_eq!(formula.count("C"), 14);
    /// assert_eq!(formula.count(("C", 13)), 4);
    /// assert_eq!(formula.count(None::<&Isotope>), 0);
    /// ```
    pub fn count(&self, selector: impl FormulaSelector) -> i32 {
        selector.count_in(self)
    }

    /// If any atom matches the selector, see [`FormulaSelector`] for all options.
    pub fn contains(&self, selector: impl FormulaSelector) -> bool {
        self.count(selector) != 0
    }

    /// The total number of atoms (the sum of all counts)
    pub fn atom_count(&self) -> i64 {
        self.isotopes.values().map(|c| i64::from(*c)).sum()
    }

    /// The number of distinct isotopes
    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    /// The number of distinct elements
    pub fn element_count(&self) -> usize {
        let mut last = None;
        let mut count = 0;
        // Isotopes are sorted on element first
        for isotope in self.isotopes.keys() {
            if last != Some(isotope.element()) {
                count += 1;
                last = Some(isotope.element());
            }
        }
        count
    }

    /// If there are no atoms in this formula
    pub fn is_empty(&self) -> bool {
        self.isotopes.is_empty()
    }

    /// All isotopes with their counts, sorted on atomic number then mass number
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Isotope, i32)> + '_ {
        self.isotopes.iter().map(|(i, c)| (i, *c))
    }
}

impl<'a> FromIterator<(&'a Isotope, i32)> for ChemicalFormula {
    fn from_iter<T: IntoIterator<Item = (&'a Isotope, i32)>>(iter: T) -> Self {
        let mut formula = Self::default();
        for (isotope, count) in iter {
            formula.add_isotope(isotope, count);
        }
        formula
    }
}

impl AddAssign<&Self> for ChemicalFormula {
    fn add_assign(&mut self, rhs: &Self) {
        self.add_formula(rhs);
    }
}

impl AddAssign for ChemicalFormula {
    fn add_assign(&mut self, rhs: Self) {
        self.add_formula(&rhs);
    }
}

impl SubAssign<&Self> for ChemicalFormula {
    fn sub_assign(&mut self, rhs: &Self) {
        self.remove_formula(rhs);
    }
}

impl SubAssign for ChemicalFormula {
    fn sub_assign(&mut self, rhs: Self) {
        self.remove_formula(&rhs);
    }
}

impl Add<&ChemicalFormula> for &ChemicalFormula {
    type Output = ChemicalFormula;
    fn add(self, rhs: &ChemicalFormula) -> Self::Output {
        let mut result = self.clone();
        result.add_formula(rhs);
        result
    }
}

impl Add for ChemicalFormula {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self::Output {
        self.add_formula(&rhs);
        self
    }
}

impl Add<&Self> for ChemicalFormula {
    type Output = Self;
    fn add(mut self, rhs: &Self) -> Self::Output {
        self.add_formula(rhs);
        self
    }
}

impl Sub<&ChemicalFormula> for &ChemicalFormula {
    type Output = ChemicalFormula;
    fn sub(self, rhs: &ChemicalFormula) -> Self::Output {
        let mut result = self.clone();
        result.remove_formula(rhs);
        result
    }
}

impl Sub for ChemicalFormula {
    type Output = Self;
    fn sub(mut self, rhs: Self) -> Self::Output {
        self.remove_formula(&rhs);
        self
    }
}

/// Negate all counts, `i32::MIN` saturates to `i32::MAX`.
impl Neg for ChemicalFormula {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for count in self.isotopes.values_mut() {
            *count = count.saturating_neg();
        }
        self
    }
}

/// Multiply all counts, saturating at the bounds of `i32`.
impl Mul<i32> for &ChemicalFormula {
    type Output = ChemicalFormula;
    fn mul(self, rhs: i32) -> Self::Output {
        if rhs == 0 {
            return ChemicalFormula::default();
        }
        ChemicalFormula {
            isotopes: self
                .isotopes
                .iter()
                .map(|(i, c)| (i.clone(), c.saturating_mul(rhs)))
                .collect(),
        }
    }
}

impl std::iter::Sum for ChemicalFormula {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut result = Self::default();
        for formula in iter {
            result.add_formula(&formula);
        }
        result
    }
}

impl<'a> std::iter::Sum<&'a Self> for ChemicalFormula {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        let mut result = Self::default();
        for formula in iter {
            result.add_formula(formula);
        }
        result
    }
}

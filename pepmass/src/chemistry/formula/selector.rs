use crate::chemistry::{ChemicalFormula, Element, Isotope};

/// Anything that selects a subset of the atoms in a formula, used by [`ChemicalFormula::count`]
/// and [`ChemicalFormula::contains`].
///
/// * An [`Isotope`] selects exactly that isotope.
/// * An [`Element`] selects all isotopes of that element.
/// * A symbol (`"C"`) selects all isotopes of the element with that symbol.
/// * A symbol with mass number (`("C", 13)`) selects that single isotope.
/// * An [`Option`] of any of these, where `None` never selects anything.
///
/// Symbols that are not known in the formula simply select nothing.
pub trait FormulaSelector {
    /// The summed count of all atoms in the formula that match this selector.
    fn count_in(&self, formula: &ChemicalFormula) -> i32;
}

impl FormulaSelector for Isotope {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        formula.isotopes.get(self).copied().unwrap_or_default()
    }
}

impl FormulaSelector for Element {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        formula
            .iter()
            .filter(|(isotope, _)| isotope.element() == self)
            .map(|(_, count)| count)
            .sum()
    }
}

impl FormulaSelector for str {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        formula
            .iter()
            .filter(|(isotope, _)| isotope.symbol() == self)
            .map(|(_, count)| count)
            .sum()
    }
}

impl FormulaSelector for String {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        self.as_str().count_in(formula)
    }
}

impl FormulaSelector for (&str, u16) {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        formula
            .iter()
            .filter(|(isotope, _)| isotope.symbol() == self.0 && isotope.mass_number() == self.1)
            .map(|(_, count)| count)
            .sum()
    }
}

impl<T: FormulaSelector> FormulaSelector for Option<T> {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        self.as_ref().map_or(0, |s| s.count_in(formula))
    }
}

impl<T: FormulaSelector + ?Sized> FormulaSelector for &T {
    fn count_in(&self, formula: &ChemicalFormula) -> i32 {
        (**self).count_in(formula)
    }
}

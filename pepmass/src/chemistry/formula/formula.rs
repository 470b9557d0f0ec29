use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    chemistry::ChemicalFormula,
    quantities::Mass,
    system::{self, da},
};

impl ChemicalFormula {
    /// The monoisotopic mass, the sum of the exact mass of every atom.
    pub fn monoisotopic_mass(&self) -> system::Mass {
        self.iter().fold(da(0.0), |total, (isotope, count)| {
            total + isotope.mass() * f64::from(count)
        })
    }

    /// The average mass, the sum of the average mass of the element of every atom. Atoms that are
    /// specified as a specific isotope still contribute the average mass of their element.
    pub fn average_mass(&self) -> system::Mass {
        self.iter()
            .chunk_by(|(isotope, _)| isotope.element().clone())
            .into_iter()
            .fold(da(0.0), |total, (element, isotopes)| {
                let count: i64 = isotopes.map(|(_, count)| i64::from(count)).sum();
                total + element.average_mass() * count as f64
            })
    }

    /// Both the monoisotopic and average mass
    pub fn mass(&self) -> Mass {
        Mass::from_quantities(self.monoisotopic_mass(), self.average_mass())
    }

    /// Write the formula in Hill notation: carbon first, hydrogen second and all other elements in
    /// alphabetical order. Without carbon all elements are alphabetical. Isotopes other than the
    /// principal isotope are written with their mass number in braces (`C{13}`) directly after the
    /// principal isotope of the same element.
    pub fn hill_notation(&self) -> String {
        let has_carbon = self.iter().any(|(isotope, _)| isotope.symbol() == "C");
        let mut output = String::new();
        for (isotope, count) in self.iter().sorted_by(|(a, _), (b, _)| {
            let rank = |symbol: &str| match symbol {
                "C" if has_carbon => 0,
                "H" if has_carbon => 1,
                _ => 2,
            };
            rank(a.symbol())
                .cmp(&rank(b.symbol()))
                .then_with(|| a.symbol().cmp(b.symbol()))
                .then_with(|| b.is_principal().cmp(&a.is_principal()))
                .then_with(|| a.mass_number().cmp(&b.mass_number()))
        }) {
            output.push_str(&isotope.to_string());
            if count != 1 {
                output.push_str(&count.to_string());
            }
        }
        output
    }
}

impl Display for ChemicalFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hill_notation())
    }
}

impl Serialize for ChemicalFormula {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hill_notation())
    }
}

impl<'de> Deserialize<'de> for ChemicalFormula {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::{
        chemistry::{ChemicalFormula, PeriodicTable},
        system::{self, da, dalton},
    };

    fn parse(text: &str) -> ChemicalFormula {
        ChemicalFormula::parse_with(text, &PeriodicTable::builtin()).unwrap()
    }

    #[test]
    fn equality() {
        assert_eq!(parse("C2H3NO"), parse("NC2OH3"));
        assert_ne!(parse("CC{13}H3NO"), parse("C2H3NO"));
        assert_ne!(parse("C2H3NO"), parse("C2H3N"));
        assert_ne!(Some(parse("C2H3NO")), None);
    }

    #[test]
    fn copy_independence() {
        let original = parse("C2H3NO");
        let mut copy = original.clone();
        let table = PeriodicTable::builtin();
        copy.add_isotope(&table.isotope("S", None).unwrap(), 1);
        copy.add_formula(&parse("H2O"));
        assert_eq!(original, parse("C2H3NO"));
        assert_ne!(original, copy);
    }

    #[test]
    fn add_and_remove() {
        let a = parse("C6H12O6");
        let b = parse("C{13}2N{15}H-2");
        let mut sum = a.clone();
        sum.add_formula(&b);
        assert_eq!(sum, &b + &a);
        sum.remove_formula(&b);
        assert_eq!(sum, a);
        assert_eq!(&a - &a, ChemicalFormula::default());
        assert_eq!(-b.clone() + b.clone(), ChemicalFormula::default());
        assert_eq!(&parse("H2O") * 3, parse("H6O3"));
        assert!((&parse("H2O") * 0).is_empty());
        let mut total = parse("H2O");
        total += parse("NH3");
        total -= &parse("H");
        assert_eq!(total, parse("NH4O"));
    }

    #[test]
    fn counts() {
        let formula = parse("C2H3NO");
        assert_eq!(formula.isotope_count(), 4);
        assert_eq!(formula.element_count(), 4);
        assert_eq!(formula.atom_count(), 7);
        let empty = ChemicalFormula::default();
        assert_eq!(empty.isotope_count(), 0);
        assert_eq!(empty.element_count(), 0);
        assert_eq!(empty.atom_count(), 0);
        assert_eq!(empty.monoisotopic_mass(), da(0.0));
        let mut cleared = formula;
        cleared.clear();
        assert_eq!(cleared, empty);
    }

    #[test]
    fn masses() {
        let close = |a: system::Mass, b: f64, limit: f64| (a.get::<dalton>() - b).abs() < limit;
        let water = parse("H2O");
        assert!(close(water.monoisotopic_mass(), 18.010_564_683_7, 1e-6));
        assert!(close(water.average_mass(), 18.015_28, 1e-3));
        let glycine = parse("C2H3NO");
        assert!(close(glycine.monoisotopic_mass(), 57.021_463_720_1, 1e-6));
        // A heavy label changes the monoisotopic but not the average mass
        let heavy = parse("CC{13}H3NO");
        assert!(close(
            heavy.monoisotopic_mass() - glycine.monoisotopic_mass(),
            1.003_354_837_8,
            1e-6
        ));
        assert!(close(heavy.average_mass() - glycine.average_mass(), 0.0, 1e-9));
        assert!(close(
            glycine.mass().monoisotopic() - glycine.monoisotopic_mass(),
            0.0,
            1e-9
        ));
    }

    #[test]
    fn hill_notation() {
        assert_eq!(parse("OC2NH3").to_string(), "C2H3NO");
        assert_eq!(parse("NaCl").to_string(), "ClNa");
        assert_eq!(parse("OH2").to_string(), "H2O");
        assert_eq!(
            parse("C{13}4C10N{15}N2O2H25").to_string(),
            "C10C{13}4H25N2N{15}O2"
        );
        assert_eq!(parse("C-1H-1O-1").to_string(), "C-1H-1O-1");
        assert_eq!(ChemicalFormula::default().to_string(), "");
        let formula = parse("C{13}4C10N{15}N2O2H25");
        assert_eq!(parse(&formula.to_string()), formula);
    }

    #[test]
    fn serde_as_text() {
        let formula = parse("C2H3NO");
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(json, "\"C2H3NO\"");
        assert_eq!(
            serde_json::from_str::<ChemicalFormula>(&json).unwrap(),
            formula
        );
        assert!(serde_json::from_str::<ChemicalFormula>("\"Xx\"").is_err());
    }
}

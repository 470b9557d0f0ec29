use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use serde::{Deserialize, Serialize};

use crate::{
    chemistry::{Element, ElementData, Isotope, builtin::builtin_elements},
    error::{LookupKind, MassError, ParseKind},
};

/// A set of elements that symbols in formulas are resolved against.
#[derive(Clone, Debug)]
pub struct PeriodicTable {
    /// Sorted on atomic number
    elements: Vec<Element>,
    by_symbol: HashMap<String, usize>,
}

/// The JSON document layout for a periodic table
#[derive(Deserialize, Serialize)]
struct TableDocument {
    elements: Vec<ElementData>,
}

static BUILTIN: LazyLock<Arc<PeriodicTable>> = LazyLock::new(|| {
    Arc::new(
        PeriodicTable::new(builtin_elements())
            .expect("The built-in periodic table is invalid, please report this crash"),
    )
});

impl PeriodicTable {
    /// Build a table from element descriptions.
    /// # Errors
    /// If any element is invalid (see [`Element::new`]) or if two elements share a symbol.
    pub fn new(elements: impl IntoIterator<Item = ElementData>) -> Result<Self, MassError> {
        let mut elements = elements
            .into_iter()
            .map(Element::new)
            .collect::<Result<Vec<_>, _>>()?;
        elements.sort();
        let mut by_symbol = HashMap::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            if by_symbol.insert(element.symbol().to_string(), index).is_some() {
                return Err(MassError::InvalidArgument(format!(
                    "Element '{}' is defined twice",
                    element.symbol()
                )));
            }
        }
        Ok(Self {
            elements,
            by_symbol,
        })
    }

    /// The table that is compiled into this crate.
    pub fn builtin() -> Arc<Self> {
        BUILTIN.clone()
    }

    /// Parse a table from a JSON document of the form
    /// `{"elements": [{"name", "symbol", "atomic_number", "average_mass", "valence_electrons", "isotopes": [{"id", "mass", "mass_number", "abundance"}]}]}`.
    /// # Errors
    /// If the document is not valid JSON, does not follow the layout, or describes invalid
    /// elements.
    pub fn from_json(text: &str) -> Result<Self, MassError> {
        let document: TableDocument = serde_json::from_str(text).map_err(|err| {
            MassError::parse(
                ParseKind::PeriodicTable,
                text.lines()
                    .take(err.line().saturating_sub(1))
                    .map(|l| l.len() + 1)
                    .sum::<usize>()
                    + err.column().saturating_sub(1),
                err.to_string(),
            )
        })?;
        Self::new(document.elements)
    }

    /// Write this table as a JSON document that [`Self::from_json`] reads back.
    /// # Errors
    /// Only if serialisation fails, which does not happen for valid tables.
    pub fn to_json(&self) -> Result<String, MassError> {
        serde_json::to_string_pretty(&TableDocument {
            elements: self.elements.iter().map(|e| e.data().clone()).collect(),
        })
        .map_err(|err| MassError::InvalidArgument(err.to_string()))
    }

    /// Get an element by its (case sensitive) symbol.
    /// # Errors
    /// If no element has this symbol.
    pub fn element(&self, symbol: &str) -> Result<&Element, MassError> {
        self.by_symbol
            .get(symbol)
            .map(|index| &self.elements[*index])
            .ok_or_else(|| MassError::not_found(LookupKind::Element, symbol))
    }

    /// Get an isotope by element symbol and mass number, no mass number gives the principal
    /// isotope.
    /// # Errors
    /// If the element does not exist or does not have an isotope with this mass number.
    pub fn isotope(&self, symbol: &str, mass_number: Option<u16>) -> Result<Isotope, MassError> {
        let element = self.element(symbol)?;
        match mass_number {
            None => Ok(element.principal_isotope()),
            Some(mass_number) => element.isotope(mass_number).ok_or_else(|| {
                MassError::not_found(LookupKind::Isotope, format!("{symbol}{{{mass_number}}}"))
            }),
        }
    }

    /// All elements sorted on atomic number
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &Element> + '_ {
        self.elements.iter()
    }

    /// The number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// If there are no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

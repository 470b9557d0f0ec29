use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::MassError,
    system::{Mass, da},
};

/// The description of a single isotope, as found in a periodic table document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct IsotopeData {
    /// Unique identifier of this isotope within its table
    pub id: usize,
    /// Exact atomic mass in Dalton
    pub mass: f64,
    /// Number of nucleons
    pub mass_number: u16,
    /// Relative natural abundance (0..=1)
    pub abundance: f64,
}

/// The description of an element, as found in a periodic table document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ElementData {
    /// Full name, eg `Carbon`
    pub name: String,
    /// Symbol, eg `C`
    pub symbol: String,
    /// Number of protons
    pub atomic_number: u16,
    /// Natural abundance weighted average mass in Dalton
    pub average_mass: f64,
    /// Number of valence electrons
    pub valence_electrons: u8,
    /// All isotopes of this element
    pub isotopes: Vec<IsotopeData>,
}

#[derive(Debug)]
struct ElementInner {
    data: ElementData,
    principal: usize,
}

/// An element from a periodic table. This is a cheap handle, cloning does not copy the data.
///
/// Two elements are equal if they have the same atomic number and symbol, independent of which
/// table they were loaded from.
#[derive(Clone)]
pub struct Element(Arc<ElementInner>);

impl Element {
    /// Create an element from its description, the principal isotope is the most abundant one.
    /// # Errors
    /// If the element has no isotopes or has two isotopes with the same mass number.
    pub fn new(data: ElementData) -> Result<Self, MassError> {
        if data.isotopes.is_empty() {
            return Err(MassError::InvalidArgument(format!(
                "Element '{}' does not have any isotopes",
                data.symbol
            )));
        }
        for (index, isotope) in data.isotopes.iter().enumerate() {
            if data.isotopes[..index]
                .iter()
                .any(|i| i.mass_number == isotope.mass_number)
            {
                return Err(MassError::InvalidArgument(format!(
                    "Element '{}' has isotope {} defined twice",
                    data.symbol, isotope.mass_number
                )));
            }
        }
        if data.isotopes.iter().all(|i| i.abundance <= 0.0) {
            warn!(
                "Element '{}' has no naturally abundant isotope, using {} as principal isotope",
                data.symbol, data.isotopes[0].mass_number
            );
        }
        // First isotope wins on ties
        let principal = data
            .isotopes
            .iter()
            .enumerate()
            .fold(0, |best, (index, isotope)| {
                if isotope.abundance > data.isotopes[best].abundance {
                    index
                } else {
                    best
                }
            });
        Ok(Self(Arc::new(ElementInner { data, principal })))
    }

    /// The full name
    pub fn name(&self) -> &str {
        &self.0.data.name
    }

    /// The symbol
    pub fn symbol(&self) -> &str {
        &self.0.data.symbol
    }

    /// The atomic number
    pub fn atomic_number(&self) -> u16 {
        self.0.data.atomic_number
    }

    /// The natural abundance weighted average mass
    pub fn average_mass(&self) -> Mass {
        da(self.0.data.average_mass)
    }

    /// The number of valence electrons
    pub fn valence_electrons(&self) -> u8 {
        self.0.data.valence_electrons
    }

    /// All isotopes in the order they were defined
    pub fn isotopes(&self) -> impl ExactSizeIterator<Item = Isotope> + '_ {
        (0..self.0.data.isotopes.len()).map(|index| Isotope {
            element: self.clone(),
            index,
        })
    }

    /// Get the isotope with the given mass number, if it is defined for this element
    pub fn isotope(&self, mass_number: u16) -> Option<Isotope> {
        self.0
            .data
            .isotopes
            .iter()
            .position(|i| i.mass_number == mass_number)
            .map(|index| Isotope {
                element: self.clone(),
                index,
            })
    }

    /// The most abundant isotope
    pub fn principal_isotope(&self) -> Isotope {
        Isotope {
            element: self.clone(),
            index: self.0.principal,
        }
    }

    /// The description this element was built from
    pub fn data(&self) -> &ElementData {
        &self.0.data
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.atomic_number() == other.atomic_number() && self.symbol() == other.symbol()
    }
}

impl Eq for Element {}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        self.atomic_number()
            .cmp(&other.atomic_number())
            .then_with(|| self.symbol().cmp(other.symbol()))
    }
}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.atomic_number().hash(state);
        self.symbol().hash(state);
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.symbol())
    }
}

/// A single isotope of an element. This is a handle into the element it belongs to.
///
/// Two isotopes are equal if they are the same nuclide (same element and mass number).
#[derive(Clone)]
pub struct Isotope {
    element: Element,
    index: usize,
}

impl Isotope {
    fn data(&self) -> &IsotopeData {
        &self.element.0.data.isotopes[self.index]
    }

    /// The element this isotope belongs to
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The symbol of the element
    pub fn symbol(&self) -> &str {
        self.element.symbol()
    }

    /// The number of nucleons
    pub fn mass_number(&self) -> u16 {
        self.data().mass_number
    }

    /// The exact mass
    pub fn mass(&self) -> Mass {
        da(self.data().mass)
    }

    /// The relative natural abundance
    pub fn abundance(&self) -> f64 {
        self.data().abundance
    }

    /// The identifier from the periodic table
    pub fn id(&self) -> usize {
        self.data().id
    }

    /// If this is the most abundant isotope of its element
    pub fn is_principal(&self) -> bool {
        self.index == self.element.0.principal
    }
}

impl PartialEq for Isotope {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element && self.mass_number() == other.mass_number()
    }
}

impl Eq for Isotope {}

impl PartialOrd for Isotope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Isotope {
    fn cmp(&self, other: &Self) -> Ordering {
        self.element
            .cmp(&other.element)
            .then_with(|| self.mass_number().cmp(&other.mass_number()))
    }
}

impl Hash for Isotope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.element.hash(state);
        self.mass_number().hash(state);
    }
}

/// Written in the formula grammar: `C` for the principal isotope, `C{13}` for any other.
impl Display for Isotope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_principal() {
            write!(f, "{}", self.symbol())
        } else {
            write!(f, "{}{{{}}}", self.symbol(), self.mass_number())
        }
    }
}

impl Debug for Isotope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.mass_number(), self.symbol())
    }
}

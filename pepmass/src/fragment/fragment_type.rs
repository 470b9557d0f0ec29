use std::{
    fmt::Display,
    ops::{BitOr, BitOrAssign},
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};

use crate::{chemistry::ChemicalFormula, sequence::Terminus};

/// The backbone fragment ion types
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[expect(non_camel_case_types)]
pub enum FragmentType {
    /// a
    a,
    /// b
    b,
    /// c
    c,
    /// x
    x,
    /// y
    y,
    /// z
    z,
}

/// The difference between a fragment ion and the neutral sum of its residues and terminal group
static DELTAS: LazyLock<[ChemicalFormula; 6]> = LazyLock::new(|| {
    [
        builtin_formula!("C-1H-1O-1"),
        builtin_formula!("H-1"),
        builtin_formula!("NH2"),
        builtin_formula!("COH-1"),
        builtin_formula!("H"),
        builtin_formula!("N-1H-2"),
    ]
});

impl FragmentType {
    /// All fragment types
    pub const ALL: [Self; 6] = [Self::a, Self::b, Self::c, Self::x, Self::y, Self::z];

    const fn index(self) -> usize {
        self as usize
    }

    /// The terminus this fragment type contains, a/b/c contain the N terminus and x/y/z the C
    /// terminus
    pub const fn terminus(self) -> Terminus {
        match self {
            Self::a | Self::b | Self::c => Terminus::N,
            Self::x | Self::y | Self::z => Terminus::C,
        }
    }

    /// The formula that is added to the summed residues and terminal group (with its
    /// modification) to get the neutral fragment. For example a b ion loses the hydrogen of the
    /// free amine while a y ion gains a hydrogen on top of the free acid.
    pub fn delta(self) -> &'static ChemicalFormula {
        &DELTAS[self.index()]
    }
}

impl Display for FragmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::a => "a",
                Self::b => "b",
                Self::c => "c",
                Self::x => "x",
                Self::y => "y",
                Self::z => "z",
            }
        )
    }
}

/// A set of fragment types
/// ```rust
/// use pepmass::prelude::*;
/// let types = FragmentTypes::BY | FragmentType::c;
/// assert!(types.contains(FragmentType::c));
/// assert_eq!(
///     types.iter().collect::<Vec<_>>(),
///     [FragmentType::b, FragmentType::c, FragmentType::y]
/// );
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct FragmentTypes(u8);

impl FragmentTypes {
    /// No fragment types
    pub const NONE: Self = Self(0);
    /// All fragment types
    pub const ALL: Self = Self(0b11_1111);
    /// b and y, the common collision induced dissociation ions
    pub const BY: Self = Self((1 << FragmentType::b.index()) | (1 << FragmentType::y.index()));
    /// c and z, the common electron transfer dissociation ions
    pub const CZ: Self = Self((1 << FragmentType::c.index()) | (1 << FragmentType::z.index()));

    /// If the fragment type is in this set
    pub const fn contains(self, fragment_type: FragmentType) -> bool {
        self.0 & (1 << fragment_type.index()) != 0
    }

    /// If the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The fragment types in this set
    pub fn iter(self) -> impl Iterator<Item = FragmentType> {
        FragmentType::ALL
            .into_iter()
            .filter(move |t| self.contains(*t))
    }
}

impl From<FragmentType> for FragmentTypes {
    fn from(value: FragmentType) -> Self {
        Self(1 << value.index())
    }
}

impl<T: Into<FragmentTypes>> BitOr<T> for FragmentTypes {
    type Output = Self;
    fn bitor(self, rhs: T) -> Self::Output {
        Self(self.0 | rhs.into().0)
    }
}

impl<T: Into<FragmentTypes>> BitOrAssign<T> for FragmentTypes {
    fn bitor_assign(&mut self, rhs: T) {
        self.0 |= rhs.into().0;
    }
}

impl FromIterator<FragmentType> for FragmentTypes {
    fn from_iter<I: IntoIterator<Item = FragmentType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |set, t| set | t)
    }
}

impl Display for FragmentTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for t in self.iter() {
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    error::MassError,
    system::{self, Charge, MassOverCharge, da, dalton},
};

/// The mass of a proton in Dalton
pub const PROTON_MASS: f64 = 1.007_276_466_812;
/// The mass of an electron in Dalton
pub const ELECTRON_MASS: f64 = 5.485_799_090_65e-4;
/// The mass of water (H2O) with the masses of the built-in periodic table
pub const WATER: Mass = Mass {
    monoisotopic: OrderedFloat(18.010_564_683_7),
    average: OrderedFloat(18.015_28),
};

/// Which of the two masses of a [`Mass`] pair to use
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum MassMode {
    /// The exact mass of the most abundant isotopes
    #[default]
    Monoisotopic,
    /// The natural abundance weighted average mass
    Average,
}

/// A pair of masses, the monoisotopic and the average mass of the same thing. Both masses are
/// handed out as [`system::Mass`] quantities, the serialised form holds both values in Dalton.
///
/// ```rust
/// use pepmass::prelude::*;
/// use pepmass::system::dalton;
/// let water = ChemicalFormula::parse("H2O").unwrap().mass();
/// let doubled = water + water;
/// assert_eq!(doubled / 2.0, water);
/// assert!((water.monoisotopic().get::<dalton>() - 18.010_565).abs() < 1e-6);
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Mass {
    monoisotopic: OrderedFloat<f64>,
    average: OrderedFloat<f64>,
}

impl Mass {
    /// Create a new mass pair from two values in Dalton
    pub const fn new(monoisotopic: f64, average: f64) -> Self {
        Self {
            monoisotopic: OrderedFloat(monoisotopic),
            average: OrderedFloat(average),
        }
    }

    /// Create a new mass pair from two mass quantities
    pub fn from_quantities(monoisotopic: system::Mass, average: system::Mass) -> Self {
        Self::new(monoisotopic.get::<dalton>(), average.get::<dalton>())
    }

    /// The monoisotopic mass
    pub fn monoisotopic(self) -> system::Mass {
        da(self.monoisotopic.0)
    }

    /// The average mass
    pub fn average(self) -> system::Mass {
        da(self.average.0)
    }

    /// Either of the masses
    pub fn get(self, mode: MassMode) -> system::Mass {
        match mode {
            MassMode::Monoisotopic => self.monoisotopic(),
            MassMode::Average => self.average(),
        }
    }

    /// Get the m/z of one of the masses for the given charge, see [`mz_from_mass`].
    /// # Errors
    /// If the charge is zero.
    pub fn to_mz(self, charge: Charge, mode: MassMode) -> Result<MassOverCharge, MassError> {
        mz_from_mass(self.get(mode), charge)
    }
}

/// Convert a neutral mass into the m/z for the given charge, protons are added for a positive
/// charge and removed for a negative charge: `mass / |z| + sign(z) * proton`. A mass of zero
/// always gives an m/z of zero.
/// ```rust
/// use pepmass::quantities::{mz_from_mass, mass_from_mz};
/// use pepmass::system::{Charge, da, dalton};
/// let mz = mz_from_mass(da(1000.0), Charge::new(2)).unwrap();
/// assert!((mz.value() - 501.007_276).abs() < 1e-6);
/// let mass = mass_from_mz(mz, Charge::new(2)).unwrap();
/// assert!((mass.get::<dalton>() - 1000.0).abs() < 1e-9);
/// assert_eq!(mz_from_mass(da(0.0), Charge::new(0)).unwrap().value(), 0.0);
/// assert!(mz_from_mass(da(1000.0), Charge::new(0)).is_err());
/// ```
/// # Errors
/// [`MassError::ZeroCharge`] if the charge is zero and the mass is not.
pub fn mz_from_mass(mass: system::Mass, charge: Charge) -> Result<MassOverCharge, MassError> {
    if mass.get::<dalton>() == 0.0 {
        return Ok(MassOverCharge::thomson(0.0));
    }
    if charge.is_zero() {
        return Err(MassError::ZeroCharge);
    }
    let z = charge.value();
    Ok(MassOverCharge::new(
        mass / f64::from(z.unsigned_abs()) + da(f64::from(z.signum()) * PROTON_MASS),
    ))
}

/// Convert an m/z back into the neutral mass for the given charge: `|z| * mz - z * proton`. An
/// m/z of zero always gives a mass of zero.
/// # Errors
/// [`MassError::ZeroCharge`] if the charge is zero and the m/z is not.
pub fn mass_from_mz(mz: MassOverCharge, charge: Charge) -> Result<system::Mass, MassError> {
    if mz.value() == 0.0 {
        return Ok(da(0.0));
    }
    if charge.is_zero() {
        return Err(MassError::ZeroCharge);
    }
    let z = charge.value();
    Ok(mz.per_charge() * f64::from(z.unsigned_abs()) - da(f64::from(z) * PROTON_MASS))
}

impl Display for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.6} Da (average {:.6} Da)",
            self.monoisotopic.0,
            self.average.0
        )
    }
}

impl Add for Mass {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.monoisotopic.0 + rhs.monoisotopic.0,
            self.average.0 + rhs.average.0,
        )
    }
}

impl Sub for Mass {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.monoisotopic.0 - rhs.monoisotopic.0,
            self.average.0 - rhs.average.0,
        )
    }
}

impl AddAssign for Mass {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Mass {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Mass {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.monoisotopic.0 * rhs, self.average.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.monoisotopic.0 / rhs, self.average.0 / rhs)
    }
}

impl Sum for Mass {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Self> for Mass {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, m| acc + *m)
    }
}

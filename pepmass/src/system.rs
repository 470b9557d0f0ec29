//! The physical quantities used throughout this crate. Single masses are [`uom`] quantities,
//! read and written in dalton. Charges count elementary charges and an m/z is a mass per
//! elementary charge (thomson). Serialised forms always use plain numbers in these units.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use uom::si::{f64::Mass, mass::dalton};

/// Create a mass from a value in dalton
/// ```rust
/// use pepmass::system::{da, dalton};
/// assert!((da(18.0).get::<dalton>() - 18.0).abs() < 1e-12);
/// ```
pub fn da(value: f64) -> Mass {
    Mass::new::<dalton>(value)
}

/// A charge as a signed number of elementary charges
/// ```rust
/// use pepmass::system::Charge;
/// assert_eq!(Charge::new(-2).to_string(), "-2e");
/// assert_eq!(Charge::from(3).value(), 3);
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Charge(i32);

impl Charge {
    /// Create a charge of the given number of elementary charges
    pub const fn new(elementary_charges: i32) -> Self {
        Self(elementary_charges)
    }

    /// The number of elementary charges
    pub const fn value(self) -> i32 {
        self.0
    }

    /// If this charge is zero
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Charge {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Display for Charge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}e", self.0)
    }
}

/// A mass over charge ratio, the mass carried by a single elementary charge (in thomson)
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd, Serialize)]
#[serde(from = "f64", into = "f64")]
pub struct MassOverCharge(Mass);

impl MassOverCharge {
    /// Create an m/z from the mass carried by a single elementary charge
    pub const fn new(mass_per_charge: Mass) -> Self {
        Self(mass_per_charge)
    }

    /// Create an m/z from a value in thomson
    pub fn thomson(value: f64) -> Self {
        Self(da(value))
    }

    /// The mass carried by a single elementary charge
    pub const fn per_charge(self) -> Mass {
        self.0
    }

    /// The value in thomson
    pub fn value(self) -> f64 {
        self.0.get::<dalton>()
    }
}

impl From<f64> for MassOverCharge {
    fn from(value: f64) -> Self {
        Self::thomson(value)
    }
}

impl From<MassOverCharge> for f64 {
    fn from(value: MassOverCharge) -> Self {
        value.value()
    }
}

impl Display for MassOverCharge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6} Th", self.value())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert!((da(1.5).get::<dalton>() - 1.5).abs() < 1e-12);
        assert!(da(1.0) < da(2.0));
        let mz = MassOverCharge::thomson(500.25);
        assert!((mz.value() - 500.25).abs() < 1e-9);
        assert_eq!(mz.per_charge(), da(500.25));
        assert_eq!(mz.to_string(), "500.250000 Th");
        assert!(Charge::default().is_zero());
        assert_eq!(Charge::new(2).to_string(), "+2e");
    }

    #[test]
    fn plain_numbers_in_json() {
        let mz = MassOverCharge::thomson(250.5);
        let json = serde_json::to_string(&mz).unwrap();
        assert!((json.parse::<f64>().unwrap() - 250.5).abs() < 1e-9);
        let back: MassOverCharge = serde_json::from_str(&json).unwrap();
        assert!((back.value() - 250.5).abs() < 1e-9);
        assert_eq!(serde_json::to_string(&Charge::new(-3)).unwrap(), "-3");
        assert_eq!(serde_json::from_str::<Charge>("2").unwrap(), Charge::new(2));
    }
}

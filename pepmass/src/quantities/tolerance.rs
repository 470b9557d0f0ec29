use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MassError, ParseKind},
    quantities::Range,
    system::{Mass, da, dalton},
};

/// The unit of a tolerance value
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ToleranceUnit {
    /// Dalton, an absolute mass difference
    Da,
    /// Parts per million, relative to the centre of the range
    #[default]
    Ppm,
    /// Milli mass units (1/1000 Da)
    Mmu,
}

impl Display for ToleranceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Da => "Da",
                Self::Ppm => "ppm",
                Self::Mmu => "mmu",
            }
        )
    }
}

/// How the value of a tolerance relates to the width of the range it builds
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ToleranceKind {
    /// The value is the full width of the range, half of it on either side of the centre
    #[default]
    FullWidth,
    /// The value is applied on both sides of the centre, the range is twice the value wide
    PlusAndMinus,
}

/// A tolerance around a (theoretical) value, for example `10 ppm` or `±0.5 Da`.
///
/// ```rust
/// use pepmass::prelude::*;
/// use pepmass::system::da;
/// let tolerance: Tolerance = "±10 ppm".parse().unwrap();
/// assert!(tolerance.within(da(1000.009), da(1000.0)));
/// assert!(!tolerance.within(da(1000.011), da(1000.0)));
/// assert_eq!(tolerance.to_string(), "±10 ppm");
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Tolerance {
    /// The value, only the magnitude is used
    pub value: f64,
    /// The unit of the value
    pub unit: ToleranceUnit,
    /// How the value is applied around the centre
    pub kind: ToleranceKind,
}

impl Tolerance {
    /// Create a new tolerance
    pub const fn new(value: f64, unit: ToleranceUnit, kind: ToleranceKind) -> Self {
        Self { value, unit, kind }
    }

    /// The distance from the centre to either bound of the range around the given mean
    pub fn half_width(&self, mean: Mass) -> Mass {
        let value = match self.kind {
            ToleranceKind::FullWidth => self.value.abs() / 2.0,
            ToleranceKind::PlusAndMinus => self.value.abs(),
        };
        match self.unit {
            ToleranceUnit::Da => da(value),
            ToleranceUnit::Ppm => mean.abs() * (value / 1e6),
            ToleranceUnit::Mmu => da(value / 1000.0),
        }
    }

    /// The range of masses that are accepted around the given mean
    pub fn range(&self, mean: Mass) -> Range<Mass> {
        let half_width = self.half_width(mean);
        Range {
            minimum: mean - half_width,
            maximum: mean + half_width,
        }
    }

    /// If the experimental mass lies within this tolerance around the theoretical mass
    pub fn within(&self, experimental: Mass, theoretical: Mass) -> bool {
        self.range(theoretical).contains(&experimental)
    }

    /// The error of the experimental mass, as a number in the unit of this tolerance
    pub fn error(&self, experimental: Mass, theoretical: Mass) -> f64 {
        let difference = (experimental - theoretical).get::<dalton>();
        match self.unit {
            ToleranceUnit::Da => difference,
            ToleranceUnit::Ppm => Self::ppm_error(experimental, theoretical),
            ToleranceUnit::Mmu => difference * 1000.0,
        }
    }

    /// The relative error in parts per million: `(experimental - theoretical) / theoretical * 1e6`.
    /// A theoretical mass of zero gives an infinite (or NaN) error.
    pub fn ppm_error(experimental: Mass, theoretical: Mass) -> f64 {
        let theoretical = theoretical.get::<dalton>();
        (experimental.get::<dalton>() - theoretical) / theoretical * 1e6
    }
}

impl Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {}",
            if self.kind == ToleranceKind::PlusAndMinus {
                "±"
            } else {
                ""
            },
            self.value,
            self.unit
        )
    }
}

impl FromStr for Tolerance {
    type Err = MassError;

    /// Parse a tolerance in the form `10 ppm`, `0.5Da` or `±5 mmu`. A leading `±` or `+-` selects
    /// [`ToleranceKind::PlusAndMinus`], the unit is case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let offset = s.len() - s.trim_start().len();
        let trimmed = s.trim();
        let (kind, rest, offset) = if let Some(rest) = trimmed.strip_prefix('±') {
            (ToleranceKind::PlusAndMinus, rest, offset + '±'.len_utf8())
        } else if let Some(rest) = trimmed.strip_prefix("+-") {
            (ToleranceKind::PlusAndMinus, rest, offset + 2)
        } else {
            (ToleranceKind::FullWidth, trimmed, offset)
        };
        let number_length = rest
            .bytes()
            .take_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
            .count();
        let value = rest[..number_length].parse::<f64>().map_err(|err| {
            MassError::parse(
                ParseKind::Tolerance,
                offset,
                format!("Invalid tolerance value: {err}"),
            )
        })?;
        let unit_text = rest[number_length..].trim_start();
        let unit_offset = offset + rest.len() - unit_text.len();
        let unit = match unit_text.to_ascii_lowercase().as_str() {
            "da" => ToleranceUnit::Da,
            "ppm" => ToleranceUnit::Ppm,
            "mmu" => ToleranceUnit::Mmu,
            _ => {
                return Err(MassError::parse(
                    ParseKind::Tolerance,
                    unit_offset,
                    format!("Invalid tolerance unit '{unit_text}', use Da, ppm or mmu"),
                ));
            }
        };
        Ok(Self { value, unit, kind })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        use ToleranceKind::{FullWidth, PlusAndMinus};
        use ToleranceUnit::{Da, Mmu, Ppm};
        let close = |a: &Mass, b: f64| (a.get::<dalton>() - b).abs() < 1e-9;
        let range = |value, unit, kind, mean| Tolerance::new(value, unit, kind).range(da(mean));

        let r = range(1.0, Da, FullWidth, 100.0);
        assert!(close(r.minimum(), 99.5) && close(r.maximum(), 100.5));
        let r = range(1.0, Da, PlusAndMinus, 100.0);
        assert!(close(r.minimum(), 99.0) && close(r.maximum(), 101.0));

        let r = range(10.0, Ppm, FullWidth, 1e6);
        assert!(close(r.minimum(), 999_995.0) && close(r.maximum(), 1_000_005.0));
        assert!(close(&range(10.0, Ppm, PlusAndMinus, 1e6).width(), 20.0));

        assert!(close(&range(5.0, Mmu, FullWidth, 10.0).width(), 0.005));
        let r = range(-5.0, Mmu, PlusAndMinus, 10.0);
        assert!(close(&r.width(), 0.01));
        assert!(close(&r.mean(), 10.0));
    }

    #[test]
    fn errors() {
        assert!((Tolerance::ppm_error(da(1000.01), da(1000.0)) - 10.0).abs() < 1e-6);
        assert!((Tolerance::ppm_error(da(999.99), da(1000.0)) + 10.0).abs() < 1e-6);
        let mmu = Tolerance::new(5.0, ToleranceUnit::Mmu, ToleranceKind::FullWidth);
        assert!((mmu.error(da(100.002), da(100.0)) - 2.0).abs() < 1e-6);
        let ppm = Tolerance::new(20.0, ToleranceUnit::Ppm, ToleranceKind::FullWidth);
        assert!(ppm.within(da(500.004), da(500.0)));
        assert!(!ppm.within(da(500.006), da(500.0)));
        assert!((ppm.error(da(500.005), da(500.0)) - 10.0).abs() < 1e-6);
        let half = ppm.half_width(da(500.0));
        assert!((half.get::<dalton>() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn text() {
        assert_eq!(
            "10 ppm".parse::<Tolerance>().unwrap(),
            Tolerance::new(10.0, ToleranceUnit::Ppm, ToleranceKind::FullWidth)
        );
        assert_eq!(
            "±0.5Da".parse::<Tolerance>().unwrap(),
            Tolerance::new(0.5, ToleranceUnit::Da, ToleranceKind::PlusAndMinus)
        );
        assert_eq!(
            " +-5 MMU ".parse::<Tolerance>().unwrap(),
            Tolerance::new(5.0, ToleranceUnit::Mmu, ToleranceKind::PlusAndMinus)
        );
        assert_eq!(
            Tolerance::new(0.5, ToleranceUnit::Da, ToleranceKind::FullWidth).to_string(),
            "0.5 Da"
        );
        assert!(matches!(
            "10 ppb".parse::<Tolerance>(),
            Err(MassError::Parse {
                kind: ParseKind::Tolerance,
                position: 3,
                ..
            })
        ));
        assert!(matches!(
            "ppm".parse::<Tolerance>(),
            Err(MassError::Parse {
                kind: ParseKind::Tolerance,
                position: 0,
                ..
            })
        ));
    }

    #[test]
    fn json() {
        let tolerance = Tolerance::new(10.0, ToleranceUnit::Ppm, ToleranceKind::PlusAndMinus);
        let json = serde_json::to_string(&tolerance).unwrap();
        assert_eq!(serde_json::from_str::<Tolerance>(&json).unwrap(), tolerance);
    }
}

use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{error::MassError, system::Mass};

/// An inclusive range `[minimum, maximum]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Range<T> {
    pub(super) minimum: T,
    pub(super) maximum: T,
}

impl<T: PartialOrd + Display> Range<T> {
    /// Create a new range.
    /// # Errors
    /// If the minimum is larger than the maximum, or the bounds cannot be compared (NaN).
    pub fn new(minimum: T, maximum: T) -> Result<Self, MassError> {
        match minimum.partial_cmp(&maximum) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self { minimum, maximum }),
            _ => Err(MassError::InvalidArgument(format!(
                "The minimum ({minimum}) of a range cannot be larger than the maximum ({maximum})"
            ))),
        }
    }
}

impl<T: PartialOrd> Range<T> {
    /// The lower bound
    pub const fn minimum(&self) -> &T {
        &self.minimum
    }

    /// The upper bound
    pub const fn maximum(&self) -> &T {
        &self.maximum
    }

    /// If the value lies within the range, both bounds included
    pub fn contains(&self, value: &T) -> bool {
        self.minimum <= *value && *value <= self.maximum
    }

    /// If this range lies completely within the other range
    pub fn is_subrange_of(&self, other: &Self) -> bool {
        other.minimum <= self.minimum && self.maximum <= other.maximum
    }

    /// If the other range lies completely within this range
    pub fn is_superrange_of(&self, other: &Self) -> bool {
        other.is_subrange_of(self)
    }

    /// If the ranges share at least one value
    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.minimum <= other.maximum && other.minimum <= self.maximum
    }

    /// Locate a value relative to this range: [`Ordering::Less`] if it is below the minimum,
    /// [`Ordering::Greater`] if it is above the maximum, and [`Ordering::Equal`] if it is inside.
    pub fn compare_to(&self, value: &T) -> Ordering {
        if *value < self.minimum {
            Ordering::Less
        } else if *value > self.maximum {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl Range<f64> {
    /// The distance between the bounds
    pub fn width(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// The centre of the range
    pub fn mean(&self) -> f64 {
        f64::midpoint(self.minimum, self.maximum)
    }
}

impl Range<Mass> {
    /// The distance between the bounds
    pub fn width(&self) -> Mass {
        self.maximum - self.minimum
    }

    /// The centre of the range
    pub fn mean(&self) -> Mass {
        (self.minimum + self.maximum) / 2.0
    }
}

impl<T: Display> Display for Range<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} - {}]", self.minimum, self.maximum)
    }
}

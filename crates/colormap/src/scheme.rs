//! Magnitude bands and their display colors.

use std::fmt;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(255, 51, 51)`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Magnitude buckets with inclusive lower and exclusive upper bounds.
///
/// Together they cover the whole real line:
/// `(-inf, 1) [1, 2) [2, 3) [3, 4) [4, 5) [5, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MagnitudeBand {
    BelowOne,
    OneToTwo,
    TwoToThree,
    ThreeToFour,
    FourToFive,
    FiveAndAbove,
}

impl MagnitudeBand {
    /// All bands, lowest first.
    pub const ALL: [MagnitudeBand; 6] = [
        Self::BelowOne,
        Self::OneToTwo,
        Self::TwoToThree,
        Self::ThreeToFour,
        Self::FourToFive,
        Self::FiveAndAbove,
    ];

    /// The band containing magnitude `m`.
    ///
    /// Boundary values belong to the higher band. NaN compares false against
    /// every threshold and lands in the lowest band.
    pub fn of(m: f64) -> Self {
        if m >= 5.0 {
            Self::FiveAndAbove
        } else if m >= 4.0 {
            Self::FourToFive
        } else if m >= 3.0 {
            Self::ThreeToFour
        } else if m >= 2.0 {
            Self::TwoToThree
        } else if m >= 1.0 {
            Self::OneToTwo
        } else {
            Self::BelowOne
        }
    }

    /// Position in [`MagnitudeBand::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Inclusive lower bound (`-inf` for the lowest band).
    pub fn lower(&self) -> f64 {
        match self {
            Self::BelowOne => f64::NEG_INFINITY,
            other => other.index() as f64,
        }
    }

    /// Exclusive upper bound (`+inf` for the highest band).
    pub fn upper(&self) -> f64 {
        match self {
            Self::FiveAndAbove => f64::INFINITY,
            other => (other.index() + 1) as f64,
        }
    }

    /// Whether `m` falls in this band.
    pub fn contains(&self, m: f64) -> bool {
        Self::of(m) == *self
    }

    /// A magnitude strictly inside the band, away from both boundaries.
    pub fn representative(&self) -> f64 {
        self.index() as f64 + 0.5
    }

    /// Fill and stroke color.
    pub fn color(&self) -> Rgb {
        match self {
            Self::BelowOne => Rgb::new(204, 255, 51),
            Self::OneToTwo => Rgb::new(255, 255, 51),
            Self::TwoToThree => Rgb::new(255, 204, 51),
            Self::ThreeToFour => Rgb::new(255, 153, 51),
            Self::FourToFive => Rgb::new(255, 102, 51),
            Self::FiveAndAbove => Rgb::new(255, 51, 51),
        }
    }

    /// Legend text: `0–1` through `4–5`, then the open-ended `5+`.
    pub fn label(&self) -> String {
        match self {
            Self::FiveAndAbove => "5+".to_string(),
            other => format!("{}\u{2013}{}", other.index(), other.index() + 1),
        }
    }
}

impl fmt::Display for MagnitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Display color for a magnitude.
///
/// Used for both circle styling and legend swatches.
pub fn band_color(m: f64) -> Rgb {
    MagnitudeBand::of(m).color()
}

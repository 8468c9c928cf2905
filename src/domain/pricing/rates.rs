//! Rate tables for move sizes and add-on services.

use std::fmt;

/// Fixed move-size categories with their flat rates.
///
/// Lookup is case-insensitive on the wire form ("2-Bedroom" and
/// "2-bedroom" are the same category). A string outside this set is not
/// an error: it prices at zero under the named `unknown-category:
/// zero-cost` policy (see [`MoveSize::flat_rate_for`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSize {
    Studio,
    OneBedroom,
    TwoBedroom,
    ThreeBedroom,
    FourBedroom,
    Office,
    Car,
}

impl MoveSize {
    /// Parses a case-insensitive category string.
    ///
    /// Returns `None` for anything outside the fixed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "studio" => Some(MoveSize::Studio),
            "1-bedroom" => Some(MoveSize::OneBedroom),
            "2-bedroom" => Some(MoveSize::TwoBedroom),
            "3-bedroom" => Some(MoveSize::ThreeBedroom),
            "4-bedroom" => Some(MoveSize::FourBedroom),
            "office" => Some(MoveSize::Office),
            "car" => Some(MoveSize::Car),
            _ => None,
        }
    }

    /// Flat rate for this category in currency units.
    ///
    /// Rates are 0.50/sqft against nominal square footage per category.
    pub fn flat_rate(&self) -> f64 {
        match self {
            MoveSize::Studio => 0.50 * 400.0,
            MoveSize::OneBedroom => 0.50 * 800.0,
            MoveSize::TwoBedroom => 0.50 * 1200.0,
            MoveSize::ThreeBedroom => 0.50 * 1600.0,
            MoveSize::FourBedroom => 0.50 * 2000.0,
            MoveSize::Office => 0.50 * 2500.0,
            MoveSize::Car => 0.50 * 150.0,
        }
    }

    /// Flat rate for a raw category string.
    ///
    /// A category outside the fixed set contributes 0 rather than
    /// failing: a typo in the size field degrades the estimate instead
    /// of rejecting the request.
    pub fn flat_rate_for(raw: &str) -> f64 {
        Self::parse(raw).map(|s| s.flat_rate()).unwrap_or(0.0)
    }
}

impl fmt::Display for MoveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoveSize::Studio => "studio",
            MoveSize::OneBedroom => "1-bedroom",
            MoveSize::TwoBedroom => "2-bedroom",
            MoveSize::ThreeBedroom => "3-bedroom",
            MoveSize::FourBedroom => "4-bedroom",
            MoveSize::Office => "office",
            MoveSize::Car => "car",
        };
        write!(f, "{}", s)
    }
}

/// Fixed add-on services with flat charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionalService {
    Packing,
    Storage,
}

impl AdditionalService {
    /// Parses a case-insensitive service name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "packing" => Some(AdditionalService::Packing),
            "storage" => Some(AdditionalService::Storage),
            _ => None,
        }
    }

    /// Flat charge for this service in currency units.
    pub fn charge(&self) -> f64 {
        match self {
            AdditionalService::Packing => 150.0,
            AdditionalService::Storage => 100.0,
        }
    }

    /// Charge for a raw service string; unknown services contribute 0
    /// (same zero-cost policy as unknown move sizes).
    pub fn charge_for(raw: &str) -> f64 {
        Self::parse(raw).map(|s| s.charge()).unwrap_or(0.0)
    }
}

impl fmt::Display for AdditionalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdditionalService::Packing => "packing",
            AdditionalService::Storage => "storage",
        };
        write!(f, "{}", s)
    }
}

//! Strategy identifiers.
//!
//! The cascade order is the declaration order of [`Strategy`] and of
//! [`Strategy::ALL`]. Masks only switch strategies on or off; they never
//! reorder them.

use serde::Serialize;
use std::fmt;

bitflags::bitflags! {
    /// Set of strategies a lookup is allowed to run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StrategyMask: u8 {
        const EXACT_SERIE             = 1 << 0;
        const EXACT_LINEA             = 1 << 1;
        const PREFIX_SUFFIX           = 1 << 2;
        const SUFFIX_SCAN             = 1 << 3;
        const LINEA_NO_LEADING_ZEROS  = 1 << 4;
    }
}

impl Default for StrategyMask {
    fn default() -> Self {
        StrategyMask::all()
    }
}

/// One step of the resolution cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Input equals a catalog serie.
    ExactSerie,
    /// Input equals a línea.
    ExactLinea,
    /// Input is the suffix printed under a known 10-digit prefix.
    PrefixSuffix,
    /// Last nine characters of the input end some catalog serie.
    SuffixScan,
    /// Input with its leading zeros stripped equals a línea.
    LineaNoLeadingZeros,
}

impl Strategy {
    /// Every strategy, in cascade order.
    pub const ALL: [Strategy; 5] = [
        Strategy::ExactSerie,
        Strategy::ExactLinea,
        Strategy::PrefixSuffix,
        Strategy::SuffixScan,
        Strategy::LineaNoLeadingZeros,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ExactSerie => "exact_serie",
            Strategy::ExactLinea => "exact_linea",
            Strategy::PrefixSuffix => "prefix_suffix",
            Strategy::SuffixScan => "suffix_scan",
            Strategy::LineaNoLeadingZeros => "linea_no_leading_zeros",
        }
    }

    pub fn from_name(name: &str) -> Option<Strategy> {
        Strategy::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn mask(self) -> StrategyMask {
        match self {
            Strategy::ExactSerie => StrategyMask::EXACT_SERIE,
            Strategy::ExactLinea => StrategyMask::EXACT_LINEA,
            Strategy::PrefixSuffix => StrategyMask::PREFIX_SUFFIX,
            Strategy::SuffixScan => StrategyMask::SUFFIX_SCAN,
            Strategy::LineaNoLeadingZeros => StrategyMask::LINEA_NO_LEADING_ZEROS,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

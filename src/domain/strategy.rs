//! Strategy configuration: which instrument to hold, and when to switch.

use serde::{Deserialize, Serialize};

use super::quantile::QuantileBand;

/// One leg of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instrument {
    Primary,
    Secondary,
}

impl Instrument {
    pub fn other(self) -> Instrument {
        match self {
            Instrument::Primary => Instrument::Secondary,
            Instrument::Secondary => Instrument::Primary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Instrument::Primary => "primary",
            Instrument::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the quartile band buys which instrument.
///
/// `Basic` treats a ratio under the 25th percentile as the primary being
/// relatively cheap, and over the 75th as the secondary being cheap.
/// `Reverse` trades the opposite reading of the same signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Basic,
    Reverse,
}

impl Direction {
    /// Target holding implied by yesterday's ratio against yesterday's band,
    /// or `None` when the ratio sits inside the band (including exactly on a
    /// threshold) and the current holding is kept.
    pub fn target(self, ratio: f64, band: QuantileBand) -> Option<Instrument> {
        let below = ratio < band.q25;
        let above = ratio > band.q75;
        match self {
            Direction::Basic if below => Some(Instrument::Primary),
            Direction::Basic if above => Some(Instrument::Secondary),
            Direction::Reverse if below => Some(Instrument::Secondary),
            Direction::Reverse if above => Some(Instrument::Primary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Basic => "basic",
            Direction::Reverse => "reverse",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of one switching simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub window: usize,
    pub direction: Direction,
    pub initial_holding: Instrument,
    pub initial_shares: f64,
}

/// How the buy-and-hold comparison sizes its fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaselineSizing {
    /// A fixed share count.
    Shares(f64),
    /// A notional amount converted at the first day's opening price.
    Notional(f64),
}

/// Parameters of the buy-and-hold comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineConfig {
    pub instrument: Instrument,
    pub sizing: BaselineSizing,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(q25: f64, q75: f64) -> QuantileBand {
        QuantileBand { q25, q75 }
    }

    #[test]
    fn basic_targets() {
        let b = band(10.0, 20.0);
        assert_eq!(Direction::Basic.target(5.0, b), Some(Instrument::Primary));
        assert_eq!(Direction::Basic.target(25.0, b), Some(Instrument::Secondary));
        assert_eq!(Direction::Basic.target(15.0, b), None);
    }

    #[test]
    fn reverse_targets() {
        let b = band(10.0, 20.0);
        assert_eq!(Direction::Reverse.target(5.0, b), Some(Instrument::Secondary));
        assert_eq!(Direction::Reverse.target(25.0, b), Some(Instrument::Primary));
        assert_eq!(Direction::Reverse.target(15.0, b), None);
    }

    #[test]
    fn threshold_equality_holds() {
        let b = band(10.0, 20.0);
        assert_eq!(Direction::Basic.target(10.0, b), None);
        assert_eq!(Direction::Basic.target(20.0, b), None);
        assert_eq!(Direction::Reverse.target(10.0, b), None);
        assert_eq!(Direction::Reverse.target(20.0, b), None);
    }

    #[test]
    fn degenerate_band_still_signals() {
        // q25 == q75 == 0: any positive ratio is above, any negative below
        let b = band(0.0, 0.0);
        assert_eq!(Direction::Basic.target(14.13, b), Some(Instrument::Secondary));
        assert_eq!(Direction::Basic.target(-3.0, b), Some(Instrument::Primary));
        assert_eq!(Direction::Basic.target(0.0, b), None);
    }

    #[test]
    fn other_leg() {
        assert_eq!(Instrument::Primary.other(), Instrument::Secondary);
        assert_eq!(Instrument::Secondary.other(), Instrument::Primary);
    }
}

//! Birthday cake candles.
//!
//! Blowing out the last lit candle triggers the grand celebration. Each
//! candle can only be blown once.

/// Default number of candles on the cake.
pub const DEFAULT_CANDLES: usize = 3;

/// Result of blowing on a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlowOutcome {
    /// Candle went out, others are still lit
    Blown { remaining: usize },
    /// Last candle went out
    Celebrate,
    AlreadyOut,
    NoSuchCandle,
}

/// Candle state for one session.
#[derive(Debug, Clone)]
pub struct Cake {
    lit: Vec<bool>,
}

impl Cake {
    /// All candles start lit.
    pub fn new(candles: usize) -> Self {
        Self {
            lit: vec![true; candles],
        }
    }

    pub fn blow(&mut self, index: usize) -> BlowOutcome {
        let Some(candle) = self.lit.get_mut(index) else {
            return BlowOutcome::NoSuchCandle;
        };
        if !*candle {
            return BlowOutcome::AlreadyOut;
        }
        *candle = false;

        match self.remaining() {
            0 => BlowOutcome::Celebrate,
            remaining => BlowOutcome::Blown { remaining },
        }
    }

    pub fn total(&self) -> usize {
        self.lit.len()
    }

    pub fn blown(&self) -> usize {
        self.total() - self.remaining()
    }

    pub fn remaining(&self) -> usize {
        self.lit.iter().filter(|lit| **lit).count()
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.lit.get(index).copied().unwrap_or(false)
    }
}

impl Default for Cake {
    fn default() -> Self {
        Self::new(DEFAULT_CANDLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blow_all_candles_celebrates() {
        let mut cake = Cake::default();
        assert_eq!(cake.total(), 3);

        assert_eq!(cake.blow(1), BlowOutcome::Blown { remaining: 2 });
        assert_eq!(cake.blow(0), BlowOutcome::Blown { remaining: 1 });
        assert_eq!(cake.remaining(), 1);
        assert_eq!(cake.blow(2), BlowOutcome::Celebrate);
        assert_eq!(cake.remaining(), 0);
        assert_eq!(cake.blown(), 3);
    }

    #[test]
    fn test_blow_twice_is_already_out() {
        let mut cake = Cake::new(2);
        cake.blow(0);
        assert_eq!(cake.blow(0), BlowOutcome::AlreadyOut);
        assert_eq!(cake.blown(), 1);
        assert!(!cake.is_lit(0));
        assert!(cake.is_lit(1));
    }

    #[test]
    fn test_blow_out_of_range() {
        let mut cake = Cake::new(3);
        assert_eq!(cake.blow(3), BlowOutcome::NoSuchCandle);
        assert_eq!(cake.blown(), 0);
    }

    #[test]
    fn test_celebration_fires_once() {
        let mut cake = Cake::new(1);
        assert_eq!(cake.blow(0), BlowOutcome::Celebrate);
        assert_eq!(cake.blow(0), BlowOutcome::AlreadyOut);
    }
}

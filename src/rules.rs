//! Regional rule sets.
//!
//! Bao is played with small regional differences. A [`Rules`] value
//! captures the ones the engine cares about; it is built once per game and
//! shared read-only by every node of the tree.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_STEPS, NHOLES};

/// Configuration of one regional variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Seeds in each hole (store included) of both sides at the start.
    pub layout: [u32; NHOLES],
    /// Whether both houses start out intact.
    pub has_house: bool,
    /// Whether the single-capture trap is enforced in the second stage.
    pub has_trap: bool,
    /// Largest pile that may start a capture in the second stage.
    pub max_capture_seeds: u32,
    /// Seeds the house must hold for the first-stage special house move.
    pub min_house_special: u32,
    /// Executor steps after which a move is considered perpetual.
    pub max_steps: usize,
}

/// The named presets shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Full bao la kiswahili: house active, 20 seeds in store.
    Kiswahili,
    /// One seed per front hole, no house, 22 seeds in store.
    Namua,
    /// Learner's bao: two seeds everywhere, empty store (second stage only).
    Kujifunza,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Kiswahili, Variant::Namua, Variant::Kujifunza];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Kiswahili => "kiswahili",
            Variant::Namua => "namua",
            Variant::Kujifunza => "kujifunza",
        }
    }

    /// Build the rule set for this preset.
    pub fn rules(self) -> Rules {
        match self {
            Variant::Kiswahili => Rules {
                layout: [0, 0, 0, 0, 8, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 20],
                has_house: true,
                has_trap: true,
                max_capture_seeds: 16,
                min_house_special: 8,
                max_steps: DEFAULT_MAX_STEPS,
            },
            Variant::Namua => Rules {
                layout: [1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 22],
                has_house: false,
                has_trap: true,
                max_capture_seeds: 16,
                min_house_special: 0,
                max_steps: DEFAULT_MAX_STEPS,
            },
            Variant::Kujifunza => Rules {
                layout: [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0],
                has_house: false,
                has_trap: true,
                max_capture_seeds: 16,
                min_house_special: 0,
                max_steps: DEFAULT_MAX_STEPS,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Variant::ALL.iter().map(|v| v.name()).collect();
                format!("unknown variant '{s}', expected one of: {}", names.join(", "))
            })
    }
}

impl Default for Rules {
    fn default() -> Self {
        Variant::Kiswahili.rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HOUSE, STORE};

    #[test]
    fn test_presets_hold_32_seeds_per_side() {
        for variant in [Variant::Kiswahili, Variant::Kujifunza] {
            let total: u32 = variant.rules().layout.iter().sum();
            assert_eq!(total, 32, "{variant} should start with 32 seeds per side");
        }
    }

    #[test]
    fn test_kiswahili_house() {
        let rules = Variant::Kiswahili.rules();
        assert!(rules.has_house);
        assert_eq!(rules.layout[HOUSE], 8);
        assert_eq!(rules.layout[STORE], 20);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("namua".parse::<Variant>(), Ok(Variant::Namua));
        assert_eq!("KUJIFUNZA".parse::<Variant>(), Ok(Variant::Kujifunza));
        assert!("mancala".parse::<Variant>().is_err());
    }
}

//! Bodily needs of a brother.
//!
//! Both needs live on a 0–100 scale.  `hunger` rises over time and is
//! brought down by eating; `energy` falls over time and is brought back up by
//! sleeping.  Values are clamped after every change.

pub const NEED_MAX: f32 = 100.0;

/// Hunger at or below this counts as fed.
pub const SATED_AT: f32 = 5.0;

/// Energy at or above this counts as rested.
pub const RESTED_AT: f32 = 95.0;

/// Which need a job replenishes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Need {
    Hunger,
    Energy,
}

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Needs {
    pub hunger: f32,
    pub energy: f32,
}

impl Default for Needs {
    /// A fed, rested brother.
    fn default() -> Self {
        Self { hunger: 0.0, energy: NEED_MAX }
    }
}

impl Needs {
    /// Apply one tick of hunger gain and energy loss.
    pub fn decay(&mut self, hunger_per_tick: f32, fatigue_per_tick: f32) {
        self.hunger = (self.hunger + hunger_per_tick).clamp(0.0, NEED_MAX);
        self.energy = (self.energy - fatigue_per_tick).clamp(0.0, NEED_MAX);
    }

    /// Move `need` towards its satisfied end by `amount`.
    pub fn restore(&mut self, need: Need, amount: f32) {
        match need {
            Need::Hunger => self.hunger = (self.hunger - amount).clamp(0.0, NEED_MAX),
            Need::Energy => self.energy = (self.energy + amount).clamp(0.0, NEED_MAX),
        }
    }

    /// Whether `need` no longer needs attention.
    pub fn is_satisfied(&self, need: Need) -> bool {
        match need {
            Need::Hunger => self.hunger <= SATED_AT,
            Need::Energy => self.energy >= RESTED_AT,
        }
    }
}

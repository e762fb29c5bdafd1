//! Combat resolution system.
//!
//! This module provides pure functions for resolving combat interactions.
//! All combat logic is deterministic given the random draws passed in.
//!
//! # Core Functions
//!
//! - `compute_damage`: Damage from attack/defense/levels and a variance draw
//! - `strike`: Apply one strike to a defender and describe it as a [`StrikeEvent`]
//! - `Initiative::roll`: Per-round coin flip for strike order
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;
pub mod round;

pub use damage::{
    apply_damage, compute_damage, defense_ratio, level_modifier_permille, minimum_damage,
    roll_variance,
};
pub use round::{Initiative, RoundReport, StrikeEvent, strike};

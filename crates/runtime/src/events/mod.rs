//! Topic-based event bus for combat events.
//!
//! Encounters publish to specific topics, and consumers subscribe only to the
//! topics they need. Events are best-effort: a slow or missing subscriber
//! never stalls combat.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{OutcomeEvent, PhaseEvent, StrikeRecord};

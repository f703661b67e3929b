//! Stat aggregation.
//!
//! # Architecture
//!
//! ```text
//! [ Persistent base: level, base/bonus attack & defense ]
//!      ↓
//! [ Equipment contributions (weapon, armor, charm) ]
//!      ↓
//! [ Focused echo buff ]
//!      ↓
//! [ EffectiveStats (stored on the player, rebuilt on demand) ]
//!      ↓
//! [ BattleStats (effective + primed tonic, one encounter only) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Derived, not authored**: effective stats are only ever written by
//!    [`recompute_stats`]
//! 2. **Idempotent**: recomputing twice equals recomputing once
//! 3. **Health ratio preserved**: max-health changes rescale current health
//! 4. **Unknown content contributes nothing**

mod aggregate;
mod battle;

pub use aggregate::{EffectiveStats, contributions, recompute_stats, rescale_health};
pub use battle::BattleStats;

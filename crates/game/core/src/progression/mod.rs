//! Progression tracker: experience, quests, codex, loadout and respawn.
//!
//! Every operation mutates the player in place and reports what happened as
//! [`ProgressEvent`]s. Requests that can be refused return an error before
//! touching any state.

mod error;
mod events;
mod experience;
mod loadout;
mod quests;
mod respawn;

pub use error::{LoadoutError, QuestError};
pub use events::ProgressEvent;
pub use experience::{gain_xp, grant_permanent_bonus, grant_reward};
pub use loadout::{equip, focus_echo, prime_tonic, unequip, unfocus_echo};
pub use quests::{
    accept_side_quest, board_offers, choose_path, collect_codex, current_main_step, current_path,
    is_offerable, on_codex_entry_added, on_location_visited, on_npc_talked, prune_stale_progress,
    ready_side_quests, record_kill, turn_in_side_quest,
};
pub use respawn::{Respawn, respawn};

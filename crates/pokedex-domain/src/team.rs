//! Battle-team capacity rule.

/// Maximum number of owned Pokémon a user may flag as battle-team members.
pub const BATTLE_TEAM_LIMIT: u64 = 6;

/// Whether one more member fits next to `current` existing members.
pub fn has_room_for_member(current: u64) -> bool {
    current < BATTLE_TEAM_LIMIT
}

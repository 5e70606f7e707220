// src/utils/rooms.rs

//! Room name shortening.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Room code followed by ` - description`.
///
/// Matches campus codes such as `C016`, `H307b`, `MK010` (Luton, Milton
/// Keynes) and dotted building codes such as `P0.102` (Bedford).
static ROOM_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([A-Za-z]+\d+[a-z]?)|([A-Za-z]\d+\.\d+))\s+-").expect("valid room regex")
});

/// Shorten a single room to its code, or return it unchanged.
pub fn short_room(room: &str) -> &str {
    ROOM_CODE
        .captures(room)
        .and_then(|caps| caps.get(1))
        .map_or(room, |code| code.as_str())
}

/// Shorten every room to its code.
///
/// If two different rooms would end up with the same code (e.g.
/// `A100 - A` and `A100 - B`), the original names are returned instead so
/// distinct rooms stay distinguishable.
pub fn rooms_short(rooms: &[String]) -> Vec<String> {
    let short: Vec<&str> = rooms.iter().map(|room| short_room(room)).collect();

    let unique_long: HashSet<&str> = rooms.iter().map(String::as_str).collect();
    let unique_short: HashSet<&str> = short.iter().copied().collect();
    if unique_short.len() < unique_long.len() {
        log::debug!("Short room codes collide, keeping full names: {rooms:?}");
        return rooms.to_vec();
    }

    short.into_iter().map(str::to_string).collect()
}

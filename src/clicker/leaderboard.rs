//! Static placeholder leaderboard. Rivals never move; only the player's row
//! tracks the live balance.

use serde::Deserialize;

use crate::console;

const RIVALS_JSON: &str = include_str!("leaderboard.json");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Rival {
    pub name: String,
    pub score: u64,
}

/// One leaderboard row as displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub name: String,
    pub score: f64,
    pub is_player: bool,
}

fn parse_rivals(json: &str) -> Vec<Rival> {
    match serde_json::from_str(json) {
        Ok(rivals) => rivals,
        Err(e) => {
            console::warn(&format!("leaderboard data is malformed, showing player only: {e}"));
            Vec::new()
        }
    }
}

pub fn rivals() -> Vec<Rival> {
    parse_rivals(RIVALS_JSON)
}

fn rank(rivals: Vec<Rival>, player_points: f64) -> Vec<Standing> {
    let mut rows: Vec<Standing> = rivals
        .into_iter()
        .map(|r| Standing {
            name: r.name,
            score: r.score as f64,
            is_player: false,
        })
        .collect();
    rows.push(Standing {
        name: "あなた".into(),
        score: player_points,
        is_player: true,
    });
    // Stable sort: the player stays below a rival with an equal score.
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows
}

/// Rivals plus the player, highest score first.
pub fn standings(player_points: f64) -> Vec<Standing> {
    rank(rivals(), player_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_parses() {
        let r = rivals();
        assert_eq!(r.len(), 2);
        assert_eq!(r[0], Rival { name: "Player_2".into(), score: 8543 });
        assert_eq!(r[1].score, 7221);
    }

    #[test]
    fn new_player_ranks_last() {
        let rows = standings(0.0);
        assert_eq!(rows.len(), 3);
        assert!(rows[2].is_player);
        assert_eq!(rows[0].name, "Player_2");
    }

    #[test]
    fn player_climbs_with_points() {
        let rows = standings(8_000.0);
        assert!(rows[1].is_player);
        let rows = standings(9_000.0);
        assert!(rows[0].is_player);
    }

    #[test]
    fn tie_keeps_rival_first() {
        let rows = standings(7_221.0);
        assert_eq!(rows[1].name, "Player_3");
        assert!(rows[2].is_player);
    }

    #[test]
    fn malformed_table_degrades_to_player_only() {
        let rows = rank(parse_rivals("{ not json"), 12.0);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_player);
    }
}

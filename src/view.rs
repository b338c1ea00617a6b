use crate::normalize::{PlayerRecord, Tier};

/// One ranking-table line. Rank is the 1-based position in the *input*
/// sequence, so filtered views renumber from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: usize,
    pub name: String,
    pub team: String,
    pub tier: Tier,
    pub goals: u32,
    pub assists: u32,
    pub score: String,
    pub highlight: bool,
}

pub fn table_rows(players: &[&PlayerRecord]) -> Vec<TableRow> {
    players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let rank = idx + 1;
            TableRow {
                rank,
                name: p.name.clone(),
                team: p.team.clone(),
                tier: p.tier,
                goals: p.goals,
                assists: p.assists,
                score: format_score(p.score),
                highlight: rank <= 3,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PodiumSlot {
    pub medal: &'static str,
    pub ordinal: &'static str,
    pub name: String,
    pub team: String,
    pub tier: Tier,
    pub score: String,
}

// Visual order is second-first-third; the store index picks the player.
const PODIUM_LAYOUT: [(usize, &str, &str); 3] =
    [(1, "2nd", "🥈"), (0, "1st", "🥇"), (2, "3rd", "🥉")];

/// Top three of the *unfiltered* store. Missing slots (fewer than three
/// players) are skipped, not padded with placeholders.
pub fn podium_slots(players: &[PlayerRecord]) -> Vec<PodiumSlot> {
    let mut slots = Vec::new();
    for (index, ordinal, medal) in PODIUM_LAYOUT {
        let Some(player) = players.get(index) else {
            continue;
        };
        slots.push(PodiumSlot {
            medal,
            ordinal,
            name: player.name.clone(),
            team: player.team.clone(),
            tier: player.tier,
            score: format_score(player.score),
        });
    }
    slots
}

pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

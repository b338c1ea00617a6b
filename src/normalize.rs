use std::cmp::Ordering;

use serde_json::Value;

pub const PLACEHOLDER_NAME: &str = "No name";
pub const PLACEHOLDER_TEAM: &str = "No Team";

// Candidate keys per field, tried in order. The sheet columns are typed by
// hand upstream, so the assist column shows up with a trailing space or an
// accent depending on who last edited the header row.
const NAME_KEYS: &[&str] = &["Name"];
const TEAM_KEYS: &[&str] = &["Team"];
const SCORE_KEYS: &[&str] = &["Points"];
const GOALS_KEYS: &[&str] = &["Goals"];
const ASSIST_KEYS: &[&str] = &["Assist ", "Assist", "Assíst"];

/// Score bands, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Legendary,
    Elite,
    Professional,
    Advanced,
    Intermediate,
}

pub const ALL_TIERS: [Tier; 5] = [
    Tier::Legendary,
    Tier::Elite,
    Tier::Professional,
    Tier::Advanced,
    Tier::Intermediate,
];

impl Tier {
    /// First matching threshold wins; anything below 450 is Intermediate.
    pub fn for_score(score: f64) -> Tier {
        if score >= 900.0 {
            Tier::Legendary
        } else if score >= 750.0 {
            Tier::Elite
        } else if score >= 600.0 {
            Tier::Professional
        } else if score >= 450.0 {
            Tier::Advanced
        } else {
            Tier::Intermediate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Legendary => "Legendary",
            Tier::Elite => "Elite",
            Tier::Professional => "Professional",
            Tier::Advanced => "Advanced",
            Tier::Intermediate => "Intermediate",
        }
    }

    /// Stable style key for the badge; the paint layer maps it to a color.
    pub fn style_tag(self) -> &'static str {
        match self {
            Tier::Legendary => "tier-legendary",
            Tier::Elite => "tier-elite",
            Tier::Professional => "tier-professional",
            Tier::Advanced => "tier-advanced",
            Tier::Intermediate => "tier-intermediate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub score: f64,
    pub goals: u32,
    pub assists: u32,
    pub tier: Tier,
}

impl PlayerRecord {
    pub fn has_team(&self) -> bool {
        self.team != PLACEHOLDER_TEAM
    }
}

/// Total over arbitrary input: every malformed or missing field degrades to
/// its default instead of erroring.
pub fn normalize_player(raw: &Value) -> PlayerRecord {
    let score = pick_f64(raw, SCORE_KEYS).unwrap_or(0.0);
    PlayerRecord {
        name: pick_string(raw, NAME_KEYS).unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
        team: pick_string(raw, TEAM_KEYS).unwrap_or_else(|| PLACEHOLDER_TEAM.to_string()),
        score,
        goals: pick_u32(raw, GOALS_KEYS).unwrap_or(0),
        assists: pick_u32(raw, ASSIST_KEYS).unwrap_or(0),
        tier: Tier::for_score(score),
    }
}

/// Normalize every fetched row and sort descending by score. `sort_by` is
/// stable, so equal scores keep their fetched order across renders.
pub fn normalize_roster(raw: &[Value]) -> Vec<PlayerRecord> {
    let mut players: Vec<PlayerRecord> = raw.iter().map(normalize_player).collect();
    players.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    players
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(s) = as_string(v) {
                return Some(s);
            }
        }
    }
    None
}

fn pick_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_f64() {
                return Some(num);
            }
            if let Some(s) = v.as_str() {
                if let Some(num) = parse_number(s) {
                    return Some(num);
                }
            }
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num as u32);
            }
            if let Some(num) = v.as_f64() {
                return Some(num.max(0.0) as u32);
            }
            if let Some(s) = v.as_str() {
                if let Some(num) = parse_number(s) {
                    return Some(num.max(0.0) as u32);
                }
            }
        }
    }
    None
}

fn as_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() { None } else { Some(s) }
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    // Strip common decorations like "pts" suffixes and thousands separators.
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tier_thresholds_are_lower_inclusive() {
        assert_eq!(Tier::for_score(900.0), Tier::Legendary);
        assert_eq!(Tier::for_score(899.999), Tier::Elite);
        assert_eq!(Tier::for_score(750.0), Tier::Elite);
        assert_eq!(Tier::for_score(600.0), Tier::Professional);
        assert_eq!(Tier::for_score(599.9), Tier::Advanced);
        assert_eq!(Tier::for_score(450.0), Tier::Advanced);
        assert_eq!(Tier::for_score(449.9), Tier::Intermediate);
        assert_eq!(Tier::for_score(0.0), Tier::Intermediate);
        assert_eq!(Tier::for_score(-50.0), Tier::Intermediate);
    }

    #[test]
    fn tier_is_monotonic_in_score() {
        let rank = |t: Tier| ALL_TIERS.iter().position(|x| *x == t).unwrap();
        let mut prev = rank(Tier::for_score(0.0));
        for score in (0..1200).map(f64::from) {
            let cur = rank(Tier::for_score(score));
            assert!(cur <= prev, "tier regressed at score {score}");
            prev = cur;
        }
    }

    #[test]
    fn empty_record_gets_all_defaults() {
        let player = normalize_player(&json!({}));
        assert_eq!(player.name, PLACEHOLDER_NAME);
        assert_eq!(player.team, PLACEHOLDER_TEAM);
        assert_eq!(player.score, 0.0);
        assert_eq!(player.goals, 0);
        assert_eq!(player.assists, 0);
        assert_eq!(player.tier, Tier::Intermediate);
        assert!(!player.has_team());
    }

    #[test]
    fn numeric_strings_coerce() {
        let player = normalize_player(&json!({
            "Name": "Lia",
            "Team": "Comets",
            "Points": "912.4",
            "Goals": "31",
            "Assist": "12",
        }));
        assert_eq!(player.score, 912.4);
        assert_eq!(player.goals, 31);
        assert_eq!(player.assists, 12);
        assert_eq!(player.tier, Tier::Legendary);
    }

    #[test]
    fn garbage_values_degrade_to_defaults() {
        let player = normalize_player(&json!({
            "Name": "  ",
            "Points": "n/a",
            "Goals": "",
            "Assist": "three",
        }));
        assert_eq!(player.name, PLACEHOLDER_NAME);
        assert_eq!(player.score, 0.0);
        assert_eq!(player.goals, 0);
        assert_eq!(player.assists, 0);
    }

    #[test]
    fn assist_key_precedence_is_fixed() {
        // Trailing-space variant wins over both spellings.
        let player = normalize_player(&json!({
            "Assist ": "7",
            "Assist": "8",
            "Assíst": "9",
        }));
        assert_eq!(player.assists, 7);

        let player = normalize_player(&json!({ "Assist": "8", "Assíst": "9" }));
        assert_eq!(player.assists, 8);

        let player = normalize_player(&json!({ "Assíst": "9" }));
        assert_eq!(player.assists, 9);
    }

    #[test]
    fn roster_sorts_descending_and_keeps_tie_order() {
        let raw = vec![
            json!({ "Name": "Low", "Points": "100" }),
            json!({ "Name": "TieA", "Points": "500" }),
            json!({ "Name": "High", "Points": "950" }),
            json!({ "Name": "TieB", "Points": "500" }),
        ];
        let players = normalize_roster(&raw);
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["High", "TieA", "TieB", "Low"]);
    }

    #[test]
    fn style_tags_are_distinct() {
        let mut tags: Vec<&str> = ALL_TIERS.iter().map(|t| t.style_tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ALL_TIERS.len());
    }
}

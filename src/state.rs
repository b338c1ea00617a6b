use std::collections::VecDeque;
use std::time::SystemTime;

use crate::normalize::{ALL_TIERS, PLACEHOLDER_TEAM, PlayerRecord, Tier};

const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

/// Current team selection. `NoTeam` matches records carrying the no-team
/// placeholder, which is excluded from the named-team options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Team(String),
    NoTeam,
}

impl TeamFilter {
    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => "All Teams",
            TeamFilter::Team(name) => name,
            TeamFilter::NoTeam => PLACEHOLDER_TEAM,
        }
    }

    pub fn matches(&self, player: &PlayerRecord) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(name) => player.team == *name,
            TeamFilter::NoTeam => player.team == PLACEHOLDER_TEAM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    All,
    Tier(Tier),
}

impl TierFilter {
    pub fn label(&self) -> &'static str {
        match self {
            TierFilter::All => "All Tiers",
            TierFilter::Tier(tier) => tier.label(),
        }
    }

    pub fn matches(&self, player: &PlayerRecord) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::Tier(tier) => player.tier == *tier,
        }
    }
}

pub struct AppState {
    pub phase: LoadPhase,
    /// Ranking store: sorted descending by score, replaced wholesale on the
    /// one successful fetch, read-only in between.
    pub players: Vec<PlayerRecord>,
    pub team_filter: TeamFilter,
    pub tier_filter: TierFilter,
    pub team_options: Vec<TeamFilter>,
    pub selected: usize,
    pub fetched_at: Option<SystemTime>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            players: Vec::new(),
            team_filter: TeamFilter::All,
            tier_filter: TierFilter::All,
            team_options: vec![TeamFilter::All],
            selected: 0,
            fetched_at: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    pub fn latest_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    /// Pure AND-filter over the store snapshot; never mutates the store.
    pub fn filtered_players(&self) -> Vec<&PlayerRecord> {
        self.players
            .iter()
            .filter(|p| self.team_filter.matches(p) && self.tier_filter.matches(p))
            .collect()
    }

    pub fn cycle_team_filter(&mut self) {
        if self.team_options.is_empty() {
            return;
        }
        let idx = self
            .team_options
            .iter()
            .position(|opt| *opt == self.team_filter)
            .unwrap_or(0);
        self.team_filter = self.team_options[(idx + 1) % self.team_options.len()].clone();
        self.selected = 0;
    }

    pub fn cycle_tier_filter(&mut self) {
        let options = tier_filter_options();
        let idx = options
            .iter()
            .position(|opt| *opt == self.tier_filter)
            .unwrap_or(0);
        self.tier_filter = options[(idx + 1) % options.len()];
        self.selected = 0;
    }

    pub fn reset_filters(&mut self) {
        self.team_filter = TeamFilter::All;
        self.tier_filter = TierFilter::All;
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.filtered_players().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Rebuilt on each successful fetch, not on filter changes: distinct named
/// teams sorted lexicographically, with All leading and NoTeam trailing only
/// when some record actually has no team.
pub fn team_filter_options(players: &[PlayerRecord]) -> Vec<TeamFilter> {
    let mut teams: Vec<String> = players
        .iter()
        .filter(|p| p.has_team())
        .map(|p| p.team.clone())
        .collect();
    teams.sort();
    teams.dedup();

    let mut options = vec![TeamFilter::All];
    options.extend(teams.into_iter().map(TeamFilter::Team));
    if players.iter().any(|p| !p.has_team()) {
        options.push(TeamFilter::NoTeam);
    }
    options
}

pub fn tier_filter_options() -> Vec<TierFilter> {
    let mut options = vec![TierFilter::All];
    options.extend(ALL_TIERS.iter().copied().map(TierFilter::Tier));
    options
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetRoster(Vec<PlayerRecord>),
    FetchFailed(String),
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetRoster(players) => {
            state.push_log(format!("[INFO] Roster loaded: {} players", players.len()));
            state.players = players;
            state.team_options = team_filter_options(&state.players);
            state.team_filter = TeamFilter::All;
            state.tier_filter = TierFilter::All;
            state.selected = 0;
            state.fetched_at = Some(SystemTime::now());
            state.phase = LoadPhase::Ready;
        }
        Delta::FetchFailed(message) => {
            state.push_log(format!("[WARN] Roster fetch failed: {message}"));
            state.phase = LoadPhase::Failed;
        }
        Delta::Log(line) => state.push_log(line),
    }
}

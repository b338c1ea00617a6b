use rank_terminal::normalize::{PLACEHOLDER_TEAM, PlayerRecord, Tier};
use rank_terminal::state::{
    AppState, Delta, LoadPhase, TeamFilter, TierFilter, apply_delta, team_filter_options,
    tier_filter_options,
};

fn player(name: &str, team: &str, score: f64) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        team: team.to_string(),
        score,
        goals: 0,
        assists: 0,
        tier: Tier::for_score(score),
    }
}

fn loaded_state(players: Vec<PlayerRecord>) -> AppState {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetRoster(players));
    state
}

#[test]
fn set_roster_replaces_store_and_resets_filters() {
    let mut state = AppState::new();
    state.team_filter = TeamFilter::NoTeam;
    state.tier_filter = TierFilter::Tier(Tier::Elite);

    apply_delta(
        &mut state,
        Delta::SetRoster(vec![player("A", "X", 800.0), player("B", "Y", 700.0)]),
    );

    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(state.players.len(), 2);
    assert_eq!(state.team_filter, TeamFilter::All);
    assert_eq!(state.tier_filter, TierFilter::All);
    assert!(state.fetched_at.is_some());
}

#[test]
fn fetch_failure_leaves_store_untouched() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::FetchFailed("http 500".to_string()));

    assert_eq!(state.phase, LoadPhase::Failed);
    assert!(state.players.is_empty());
    assert!(state.fetched_at.is_none());
    assert!(state.latest_log().is_some_and(|log| log.contains("http 500")));
}

#[test]
fn team_options_order_and_no_team_sentinel() {
    let players = vec![
        player("A", "Zeta", 900.0),
        player("B", "Alpha", 800.0),
        player("C", PLACEHOLDER_TEAM, 700.0),
        player("D", "Alpha", 600.0),
    ];
    let options = team_filter_options(&players);
    assert_eq!(
        options,
        vec![
            TeamFilter::All,
            TeamFilter::Team("Alpha".to_string()),
            TeamFilter::Team("Zeta".to_string()),
            TeamFilter::NoTeam,
        ]
    );
}

#[test]
fn no_team_option_absent_when_every_player_has_a_team() {
    let players = vec![player("A", "Zeta", 900.0), player("B", "Alpha", 800.0)];
    let options = team_filter_options(&players);
    assert!(!options.contains(&TeamFilter::NoTeam));
    assert_eq!(options.len(), 3);
}

#[test]
fn team_filter_keeps_only_matching_players() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 900.0),
        player("B", "Alpha", 800.0),
        player("C", "Zeta", 700.0),
    ]);
    state.team_filter = TeamFilter::Team("Zeta".to_string());
    let filtered = state.filtered_players();
    let names: Vec<&str> = filtered.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn absent_team_filters_to_empty() {
    let mut state = loaded_state(vec![player("A", "Zeta", 900.0)]);
    state.team_filter = TeamFilter::Team("Nobody".to_string());
    assert!(state.filtered_players().is_empty());
}

#[test]
fn no_team_filter_matches_placeholder_only() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 900.0),
        player("B", PLACEHOLDER_TEAM, 800.0),
    ]);
    state.team_filter = TeamFilter::NoTeam;
    let filtered = state.filtered_players();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "B");
}

#[test]
fn team_and_tier_filters_combine_with_and() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 950.0),
        player("B", "Zeta", 760.0),
        player("C", "Alpha", 920.0),
    ]);
    state.team_filter = TeamFilter::Team("Zeta".to_string());
    state.tier_filter = TierFilter::Tier(Tier::Legendary);

    let filtered = state.filtered_players();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "A");
}

#[test]
fn filtering_never_mutates_the_store() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 900.0),
        player("B", "Alpha", 800.0),
    ]);
    state.team_filter = TeamFilter::Team("Alpha".to_string());
    let _ = state.filtered_players();
    assert_eq!(state.players.len(), 2);
}

#[test]
fn cycling_team_filter_walks_the_option_list() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 900.0),
        player("B", "Alpha", 800.0),
        player("C", PLACEHOLDER_TEAM, 700.0),
    ]);

    assert_eq!(state.team_filter, TeamFilter::All);
    state.cycle_team_filter();
    assert_eq!(state.team_filter, TeamFilter::Team("Alpha".to_string()));
    state.cycle_team_filter();
    assert_eq!(state.team_filter, TeamFilter::Team("Zeta".to_string()));
    state.cycle_team_filter();
    assert_eq!(state.team_filter, TeamFilter::NoTeam);
    state.cycle_team_filter();
    assert_eq!(state.team_filter, TeamFilter::All);
}

#[test]
fn cycling_tier_filter_covers_every_tier() {
    let mut state = AppState::new();
    let options = tier_filter_options();
    assert_eq!(options.len(), 6);

    for expected in options.iter().skip(1).chain(options.iter().take(1)) {
        state.cycle_tier_filter();
        assert_eq!(state.tier_filter, *expected);
    }
}

#[test]
fn cycling_resets_table_selection() {
    let mut state = loaded_state(vec![
        player("A", "Zeta", 900.0),
        player("B", "Alpha", 800.0),
    ]);
    state.select_next();
    assert_eq!(state.selected, 1);
    state.cycle_team_filter();
    assert_eq!(state.selected, 0);
}

#[test]
fn selection_is_bounded_by_filtered_length() {
    let mut state = loaded_state(vec![player("A", "Zeta", 900.0)]);
    state.select_next();
    state.select_next();
    assert_eq!(state.selected, 0);
    state.select_prev();
    assert_eq!(state.selected, 0);
}

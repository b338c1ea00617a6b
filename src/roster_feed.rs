use std::sync::mpsc::Sender;
use std::thread;

use crate::normalize::normalize_roster;
use crate::roster_fetch::{fetch_roster_raw, roster_url};
use crate::state::Delta;

/// One-shot provider: fetch the roster once off the UI thread and report the
/// outcome. Filter changes re-render from the store; nothing ever refetches.
pub fn spawn_roster_provider(tx: Sender<Delta>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Fetching roster from {}",
            roster_url()
        )));
        match fetch_roster_raw() {
            Ok(rows) => {
                let players = normalize_roster(&rows);
                let _ = tx.send(Delta::SetRoster(players));
            }
            Err(err) => {
                let _ = tx.send(Delta::FetchFailed(format!("{err:#}")));
            }
        }
    });
}

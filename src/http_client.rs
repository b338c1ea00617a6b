use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. No request timeout is configured: a hung roster
/// fetch keeps the loading screen up until the process exits.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| Client::builder().build().context("failed to build http client"))
}

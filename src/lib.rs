pub mod http_client;
pub mod normalize;
pub mod roster_feed;
pub mod roster_fetch;
pub mod state;
pub mod view;

mod client;

pub use client::{ItemSummary, MapleApiClient};

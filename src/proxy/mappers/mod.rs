// Mappers - inbound JSON to upstream form parameters

pub mod uptimerobot;

pub use uptimerobot::{flatten_value, ClientRequest, UpstreamParameters};

// Adapters layer: the HTTP surface and process wiring around the core.

pub mod http;
pub mod server;

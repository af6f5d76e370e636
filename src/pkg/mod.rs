pub mod board;
pub mod client;
pub mod internal;
pub mod server;

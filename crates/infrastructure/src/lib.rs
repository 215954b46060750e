//! iterdns infrastructure layer: network adapters for the application ports.
pub mod dns;

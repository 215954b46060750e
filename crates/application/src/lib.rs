//! iterdns application layer: the transport port and the resolution use cases.
pub mod ports;
pub mod use_cases;

//! iterdns domain layer: DNS wire codec, errors and configuration model.
pub mod config;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use errors::{DomainError, HopKind, ResolutionError, TransportError};
pub use wire::{
    DomainName, Header, Label, Message, MessageOptions, Question, RData, RecordType,
    ResourceRecord,
};

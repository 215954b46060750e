use thiserror::Error;

/// Failures raised while encoding or decoding DNS wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("Invalid compression pointer to offset {offset} at position {position}")]
    InvalidPointer { offset: usize, position: usize },

    #[error("Compression pointer cycle through offset {offset}")]
    CompressionCycle { offset: usize },

    #[error("Compression pointer to offset {offset} outside message of {len} bytes")]
    PointerOutOfRange { offset: usize, len: usize },

    #[error("Unsupported record type: {0}")]
    UnsupportedType(u16),

    #[error("Unsupported record class: {0}")]
    UnsupportedClass(u16),

    #[error("Label '{label}' is {len} bytes long (max 63)")]
    LabelTooLong { label: String, len: usize },

    #[error("Empty label in domain name '{0}'")]
    EmptyLabel(String),

    #[error("Reserved label type in length byte 0x{0:02x}")]
    ReservedLabelType(u8),

    #[error("Invalid RDATA length for {rtype}: expected {expected}, got {actual}")]
    InvalidRdataLength {
        rtype: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Response ID {actual} does not match query ID {expected}")]
    IdMismatch { expected: u16, actual: u16 },
}

/// Failures reported by a transport while exchanging one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to bind socket for {server}: {message}")]
    Bind { server: String, message: String },

    #[error("Failed to connect to {server}: {message}")]
    Connect { server: String, message: String },

    #[error("Failed to send query to {server}: {message}")]
    Send { server: String, message: String },

    #[error("Failed to receive response from {server}: {message}")]
    Receive { server: String, message: String },

    #[error("Transport timeout talking to {server}")]
    Timeout { server: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopKind {
    Referral,
    Cname,
}

impl std::fmt::Display for HopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HopKind::Referral => write!(f, "referral"),
            HopKind::Cname => write!(f, "CNAME"),
        }
    }
}

/// Terminal failure of one `resolve` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid hostname: {0}")]
    InvalidHostname(DomainError),

    #[error("Failed to parse DNS response: {0}")]
    Parse(#[from] DomainError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("No usable glue record for delegation to {zone_ns}")]
    NoGlueRecord { zone_ns: String },

    #[error("Too many {kind} hops (limit {limit})")]
    TooManyHops { limit: usize, kind: HopKind },

    #[error("No address records for {name}")]
    NoAnswer { name: String },
}

pub mod bytes;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod record_type;

pub use bytes::WireReader;
pub use header::Header;
pub use message::{Message, MessageOptions};
pub use name::{same_name, DomainName, Label};
pub use question::Question;
pub use record::{RData, ResourceRecord};
pub use record_type::{RecordType, CLASS_IN};

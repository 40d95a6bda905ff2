pub mod config;
pub mod form;
pub mod headers;
pub mod inbound;
pub mod multi_value;
pub mod protocol;
pub mod prune;
pub mod version;
pub mod xray;

pub use form::{InboundForm, defaults};
pub use inbound::{parse, serialize, serialize_value};

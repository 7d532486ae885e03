//! HTTP adapters for the record-keeping backend and the identity service

pub mod error;
pub mod identity;
pub mod mapper;
pub mod source;
pub mod wire;

pub use error::SourceError;
pub use identity::HttpIdentityProvider;
pub use source::HttpRecordSource;

//! Infrastructure layer - external system adapters

pub mod http;

//! Application services and ports.

#![forbid(unsafe_code)]

mod address_search_ports;
mod address_search_service;

pub use address_search_ports::AddressSearchProvider;
pub use address_search_service::{AddressSearchService, MAX_MIN_CHARS};

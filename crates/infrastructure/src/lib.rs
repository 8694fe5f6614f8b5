//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_address_search_provider;
mod static_address_search_provider;

pub use http_address_search_provider::HttpAddressSearchProvider;
pub use static_address_search_provider::StaticAddressSearchProvider;

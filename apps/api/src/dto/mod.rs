mod addresses;
mod common;
mod dates;
mod fields;
mod statuses;

pub use addresses::{
    AddressOptionResponse, AddressSearchQuery, FormatAddressRequest, FormatAddressResponse,
};
pub use common::HealthResponse;
pub use dates::{CheckDateRequest, DateCheckResponse, RelativeDateQuery, RelativeDateResponse};
pub use fields::{CheckFieldRequest, FieldCheckResponse, FieldRuleResponse, FieldValidityResponse};
pub use statuses::{StatusQuery, StatusResponse};

#[cfg(test)]
mod tests {
    use super::{
        AddressOptionResponse, CheckDateRequest, CheckFieldRequest, DateCheckResponse,
        FieldCheckResponse, FieldRuleResponse, FieldValidityResponse, FormatAddressRequest,
        FormatAddressResponse, HealthResponse, RelativeDateResponse, StatusResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        AddressOptionResponse::export(&config)?;
        CheckDateRequest::export(&config)?;
        CheckFieldRequest::export(&config)?;
        DateCheckResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        FieldCheckResponse::export(&config)?;
        FieldRuleResponse::export(&config)?;
        FieldValidityResponse::export(&config)?;
        FormatAddressRequest::export(&config)?;
        FormatAddressResponse::export(&config)?;
        HealthResponse::export(&config)?;
        RelativeDateResponse::export(&config)?;
        StatusResponse::export(&config)?;

        Ok(())
    }
}

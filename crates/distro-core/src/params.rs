//! Monetary-policy parameters of the distro module.
//!
//! [`ScheduleParams`] is the record as stored by the configuration store:
//! strings for addresses and the start date, exactly as configured. It is
//! validated once before any mint evaluation; [`Schedule`](crate::Schedule)
//! is the parsed form the calculator works with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::address::AddressValidator;
use crate::calendar::CalendarDate;
use crate::error::ParamsError;

pub const DEFAULT_DENOM: &str = "stake";
pub const DEFAULT_MAX_SUPPLY: u64 = 0;
pub const DEFAULT_SCHEDULE_START_DATE: &str = "2025-07-22";
pub const DEFAULT_HALVING_PERIOD_MONTHS: u64 = 12;

/// Emission schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Addresses allowed to request a mint.
    pub issuing_authorities: BTreeSet<String>,
    /// Destination account for minted funds.
    pub receiving_address: String,
    pub denom: String,
    /// Absolute ceiling on cumulative issuance.
    pub max_supply: u64,
    /// `YYYY-MM-DD`.
    pub schedule_start_date: String,
    pub halving_period_months: u64,
}

impl ScheduleParams {
    pub fn new(
        issuing_authorities: impl IntoIterator<Item = impl Into<String>>,
        receiving_address: impl Into<String>,
        denom: impl Into<String>,
        max_supply: u64,
        schedule_start_date: impl Into<String>,
        halving_period_months: u64,
    ) -> Self {
        Self {
            issuing_authorities: issuing_authorities.into_iter().map(Into::into).collect(),
            receiving_address: receiving_address.into(),
            denom: denom.into(),
            max_supply,
            schedule_start_date: schedule_start_date.into(),
            halving_period_months,
        }
    }

    /// Validate the params, reporting the first failure.
    pub fn validate(&self, addresses: &impl AddressValidator) -> Result<(), ParamsError> {
        validate_issuing_authorities(&self.issuing_authorities, addresses)?;
        validate_receiving_address(&self.receiving_address, addresses)?;
        validate_denom(&self.denom)?;
        validate_max_supply(self.max_supply)?;
        validate_schedule_start_date(&self.schedule_start_date)?;
        validate_halving_period_months(self.halving_period_months)?;
        Ok(())
    }

    /// Whether `signer` may request a mint.
    pub fn is_authorized(&self, signer: &str) -> bool {
        self.issuing_authorities.contains(signer)
    }

    /// Parsed schedule start date.
    pub fn start_date(&self) -> Result<CalendarDate, ParamsError> {
        validate_schedule_start_date(&self.schedule_start_date)
    }
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            issuing_authorities: BTreeSet::new(),
            receiving_address: String::new(),
            denom: DEFAULT_DENOM.to_string(),
            max_supply: DEFAULT_MAX_SUPPLY,
            schedule_start_date: DEFAULT_SCHEDULE_START_DATE.to_string(),
            halving_period_months: DEFAULT_HALVING_PERIOD_MONTHS,
        }
    }
}

fn validate_issuing_authorities(
    authorities: &BTreeSet<String>,
    addresses: &impl AddressValidator,
) -> Result<(), ParamsError> {
    if authorities.is_empty() {
        return Err(ParamsError::NoIssuingAuthority);
    }
    for authority in authorities {
        if authority.is_empty() {
            return Err(ParamsError::EmptyIssuingAuthority);
        }
        if !addresses.is_valid_address(authority) {
            return Err(ParamsError::InvalidIssuingAuthority(authority.clone()));
        }
    }
    Ok(())
}

fn validate_receiving_address(
    address: &str,
    addresses: &impl AddressValidator,
) -> Result<(), ParamsError> {
    if address.is_empty() {
        return Err(ParamsError::EmptyReceivingAddress);
    }
    if !addresses.is_valid_address(address) {
        return Err(ParamsError::InvalidReceivingAddress(address.to_string()));
    }
    Ok(())
}

fn validate_denom(denom: &str) -> Result<(), ParamsError> {
    if denom.is_empty() {
        return Err(ParamsError::EmptyDenom);
    }
    Ok(())
}

fn validate_max_supply(max_supply: u64) -> Result<(), ParamsError> {
    if max_supply == 0 {
        return Err(ParamsError::ZeroMaxSupply);
    }
    Ok(())
}

fn validate_schedule_start_date(date: &str) -> Result<CalendarDate, ParamsError> {
    if date.is_empty() {
        return Err(ParamsError::EmptyStartDate);
    }
    CalendarDate::parse(date).map_err(ParamsError::InvalidStartDate)
}

fn validate_halving_period_months(months: u64) -> Result<(), ParamsError> {
    if months == 0 {
        return Err(ParamsError::ZeroHalvingPeriod);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Bech32AddressValidator;

    const AUTHORITY: &str = "gnodi1qyqszqgpqyqszqgpqyqszqgpqyqszqgp4n2pp7";
    const RECEIVER: &str = "gnodi1qgpqyqszqgpqyqszqgpqyqszqgpqyqszyhvy2g";

    fn valid_params() -> ScheduleParams {
        ScheduleParams::new([AUTHORITY], RECEIVER, "ugnod", 1_000_000, "2025-01-01", 12)
    }

    fn validate(params: &ScheduleParams) -> Result<(), ParamsError> {
        params.validate(&Bech32AddressValidator::default())
    }

    #[test]
    fn test_valid_params() {
        assert!(validate(&valid_params()).is_ok());
    }

    #[test]
    fn test_default_params_do_not_validate() {
        let params = ScheduleParams::default();
        assert_eq!(params.denom, "stake");
        assert_eq!(params.schedule_start_date, "2025-07-22");
        assert_eq!(params.halving_period_months, 12);
        assert_eq!(validate(&params), Err(ParamsError::NoIssuingAuthority));
    }

    #[test]
    fn test_empty_authority() {
        let mut params = valid_params();
        params.issuing_authorities.insert(String::new());
        assert_eq!(validate(&params), Err(ParamsError::EmptyIssuingAuthority));
    }

    #[test]
    fn test_invalid_authority() {
        let mut params = valid_params();
        params.issuing_authorities.insert("gnodi1bogus".into());
        assert!(matches!(
            validate(&params),
            Err(ParamsError::InvalidIssuingAuthority(_))
        ));
    }

    #[test]
    fn test_receiving_address() {
        let mut params = valid_params();
        params.receiving_address.clear();
        assert_eq!(validate(&params), Err(ParamsError::EmptyReceivingAddress));

        params.receiving_address = "cosmos1qyqszqgpqyqszqgpqyqszqgpqyqszqgpjnp7du".into();
        assert!(matches!(
            validate(&params),
            Err(ParamsError::InvalidReceivingAddress(_))
        ));
    }

    #[test]
    fn test_denom_and_amounts() {
        let mut params = valid_params();
        params.denom.clear();
        assert_eq!(validate(&params), Err(ParamsError::EmptyDenom));

        let mut params = valid_params();
        params.max_supply = 0;
        assert_eq!(validate(&params), Err(ParamsError::ZeroMaxSupply));

        let mut params = valid_params();
        params.halving_period_months = 0;
        assert_eq!(validate(&params), Err(ParamsError::ZeroHalvingPeriod));
    }

    #[test]
    fn test_start_date() {
        let mut params = valid_params();
        params.schedule_start_date.clear();
        assert_eq!(validate(&params), Err(ParamsError::EmptyStartDate));

        params.schedule_start_date = "2025-1-1".into();
        assert!(matches!(
            validate(&params),
            Err(ParamsError::InvalidStartDate(_))
        ));

        params.schedule_start_date = "2025-02-29".into();
        assert!(matches!(
            validate(&params),
            Err(ParamsError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn test_address_errors_name_the_address() {
        let mut params = valid_params();
        params.receiving_address = "gnodi1bogus".into();
        let err = validate(&params).unwrap_err();
        assert_eq!(err.address(), Some("gnodi1bogus"));

        assert_eq!(ParamsError::EmptyReceivingAddress.address(), Some(""));
        assert_eq!(ParamsError::NoIssuingAuthority.address(), None);
        assert_eq!(ParamsError::ZeroMaxSupply.address(), None);
    }

    #[test]
    fn test_first_failure_is_reported() {
        let params = ScheduleParams {
            denom: String::new(),
            max_supply: 0,
            ..valid_params()
        };
        assert_eq!(validate(&params), Err(ParamsError::EmptyDenom));
    }

    #[test]
    fn test_is_authorized() {
        let params = valid_params();
        assert!(params.is_authorized(AUTHORITY));
        assert!(!params.is_authorized(RECEIVER));
        assert!(!params.is_authorized(""));
    }

    #[test]
    fn test_json_field_names() {
        let params = valid_params();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["max_supply"], 1_000_000);
        assert_eq!(json["schedule_start_date"], "2025-01-01");
        assert_eq!(json["issuing_authorities"][0], AUTHORITY);
    }
}

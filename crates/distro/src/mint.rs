//! The mint transition.
//!
//! One request, one response. The checks run in a fixed order and stop at the
//! first failure; the ledger is touched only after every check has passed.
//!
//! 0. The params validate. A bad params address reports `InvalidAddress`
//!    for that address; any other params defect reports `InvalidSchedule`.
//! 1. The signer is a syntactically valid address.
//! 2. The signer is an issuing authority.
//! 3. The amount is non-zero.
//! 4. Supply plus amount stays within the absolute max supply.
//! 5. Supply plus amount stays within the halving schedule limit.
//!
//! Params are checked first, so invalid params mask a bad signer. The supply
//! is read between steps 3 and 4, so an unauthorized request never causes a
//! supply read.

use distro_core::{maximum_cumulative_issuance, AddressValidator, CalendarDate, ScheduleParams};
use distro_ledger::{Issuer, SupplyOracle};
use serde::{Deserialize, Serialize};

use crate::error::{MintError, Result};

/// A request to mint `amount` of the configured denom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub signer: String,
    /// Absent in the wire form means zero, which is rejected.
    #[serde(default)]
    pub amount: u64,
}

impl MintRequest {
    pub fn new(signer: impl Into<String>, amount: u64) -> Self {
        Self {
            signer: signer.into(),
            amount,
        }
    }
}

/// A committed mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintCommitted {
    pub denom: String,
    pub amount: u64,
    /// Account the minted funds were transferred to.
    pub recipient: String,
    /// Schedule limit the request was checked against.
    pub limit: u64,
}

/// Outcome of the check phase: the request may mint `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintPermit {
    pub amount: u64,
    pub limit: u64,
}

/// Evaluates mint requests against a supply oracle and issues through an
/// issuer.
///
/// Holds no state between calls. Atomicity of the issue-then-transfer pair
/// is the caller's concern: run `process_mint` inside the host transaction.
#[derive(Debug, Clone)]
pub struct MintTransition<O, I, A> {
    oracle: O,
    issuer: I,
    addresses: A,
}

impl<O, I, A> MintTransition<O, I, A>
where
    O: SupplyOracle,
    I: Issuer,
    A: AddressValidator,
{
    pub fn new(oracle: O, issuer: I, addresses: A) -> Self {
        Self {
            oracle,
            issuer,
            addresses,
        }
    }

    /// Check `request` and, if it passes, issue and transfer the amount.
    pub fn process_mint(
        &self,
        request: &MintRequest,
        params: &ScheduleParams,
        as_of: CalendarDate,
    ) -> Result<MintCommitted> {
        let result = self.try_mint(request, params, as_of);
        match &result {
            Ok(committed) => tracing::info!(
                signer = %request.signer,
                denom = %committed.denom,
                amount = committed.amount,
                recipient = %committed.recipient,
                limit = committed.limit,
                %as_of,
                "mint committed"
            ),
            Err(e) => log_rejection(request, as_of, e),
        }
        result
    }

    /// The check phase alone, against an explicit supply snapshot.
    ///
    /// Performs no reads or writes through the collaborators.
    pub fn evaluate(
        &self,
        request: &MintRequest,
        params: &ScheduleParams,
        current_supply: u64,
        as_of: CalendarDate,
    ) -> Result<MintPermit> {
        let result = self
            .authorize(request, params)
            .and_then(|()| check_caps(request, params, current_supply, as_of));
        if let Err(e) = &result {
            log_rejection(request, as_of, e);
        }
        result
    }

    fn try_mint(
        &self,
        request: &MintRequest,
        params: &ScheduleParams,
        as_of: CalendarDate,
    ) -> Result<MintCommitted> {
        self.authorize(request, params)?;

        let current_supply = self.oracle.current_supply(&params.denom);
        let permit = check_caps(request, params, current_supply, as_of)?;

        self.issuer.mint(&params.denom, permit.amount)?;
        self.issuer
            .transfer(&params.denom, permit.amount, &params.receiving_address)?;

        Ok(MintCommitted {
            denom: params.denom.clone(),
            amount: permit.amount,
            recipient: params.receiving_address.clone(),
            limit: permit.limit,
        })
    }

    /// Steps 0 to 3. Reads nothing from the ledger.
    fn authorize(&self, request: &MintRequest, params: &ScheduleParams) -> Result<()> {
        params.validate(&self.addresses)?;

        if !self.addresses.is_valid_address(&request.signer) {
            return Err(MintError::InvalidAddress(request.signer.clone()));
        }
        if !params.is_authorized(&request.signer) {
            return Err(MintError::Unauthorized {
                signer: request.signer.clone(),
            });
        }
        if request.amount == 0 {
            return Err(MintError::InvalidRequest(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Steps 4 and 5. Sums are widened so `supply + amount` cannot wrap.
fn check_caps(
    request: &MintRequest,
    params: &ScheduleParams,
    current_supply: u64,
    as_of: CalendarDate,
) -> Result<MintPermit> {
    let total = u128::from(current_supply) + u128::from(request.amount);

    if total > u128::from(params.max_supply) {
        return Err(MintError::MaxSupplyExceeded {
            requested: request.amount,
            current_supply,
            max_supply: params.max_supply,
        });
    }

    let limit = maximum_cumulative_issuance(params, as_of)?;
    if total > u128::from(limit) {
        return Err(MintError::ScheduleLimitExceeded {
            requested: request.amount,
            current_supply,
            limit,
        });
    }

    Ok(MintPermit {
        amount: request.amount,
        limit,
    })
}

fn log_rejection(request: &MintRequest, as_of: CalendarDate, e: &MintError) {
    tracing::debug!(
        signer = %request.signer,
        amount = request.amount,
        %as_of,
        kind = e.kind(),
        error = %e,
        "mint rejected"
    );
}

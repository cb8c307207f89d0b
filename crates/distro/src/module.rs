//! The distro module: loaded params plus the entry points a host calls.

use distro_core::{
    BlockTime, Bech32AddressValidator, CalendarDate, ParamsDigest, Schedule, ScheduleError,
    ScheduleParams, ScheduleSnapshot, DEFAULT_ADDRESS_PREFIX,
};
use distro_ledger::{MemoryLedger, DEFAULT_ISSUER_ACCOUNT};
use serde::{Deserialize, Serialize};

use crate::error::{MintError, Result};
use crate::mint::{MintCommitted, MintRequest, MintTransition};

/// Module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Human-readable part of account addresses.
    pub address_prefix: String,
    /// Name of the module-owned issuer account.
    pub module_account: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            module_account: DEFAULT_ISSUER_ACCOUNT.to_string(),
        }
    }
}

/// A loaded distro module.
///
/// Params are validated once, at construction. Every call after that is a
/// pure function of the module, the ledger it is handed, and the block time;
/// the module caches nothing between calls.
#[derive(Debug, Clone)]
pub struct DistroModule {
    config: ModuleConfig,
    params: ScheduleParams,
    addresses: Bech32AddressValidator,
    schedule: Schedule,
    digest: ParamsDigest,
}

impl DistroModule {
    /// Load `params`, rejecting them if they fail validation.
    pub fn new(config: ModuleConfig, params: ScheduleParams) -> Result<Self> {
        let addresses = Bech32AddressValidator::new(config.address_prefix.clone());
        params.validate(&addresses)?;
        let schedule = Schedule::try_from(&params)?;
        let digest = ParamsDigest::of(&params);

        tracing::info!(
            denom = %params.denom,
            max_supply = params.max_supply,
            start = %schedule.start(),
            halving_period_months = schedule.halving_period_months(),
            authorities = params.issuing_authorities.len(),
            digest = %digest,
            "distro module loaded"
        );

        Ok(Self {
            config,
            params,
            addresses,
            schedule,
            digest,
        })
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn params(&self) -> &ScheduleParams {
        &self.params
    }

    pub fn params_digest(&self) -> ParamsDigest {
        self.digest
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// An empty ledger whose issuer account is this module's account.
    pub fn new_ledger(&self) -> MemoryLedger {
        MemoryLedger::new(self.config.module_account.clone())
    }

    /// Schedule state at `block_time`.
    pub fn schedule_snapshot(&self, block_time: BlockTime) -> Result<ScheduleSnapshot> {
        let as_of = as_of_date(block_time)?;
        Ok(self.schedule.snapshot(as_of)?)
    }

    /// Process a mint request at `block_time`.
    ///
    /// Runs inside a ledger branch: on any error the ledger is unchanged.
    pub fn handle_mint(
        &self,
        ledger: &MemoryLedger,
        request: &MintRequest,
        block_time: BlockTime,
    ) -> Result<MintCommitted> {
        let as_of = as_of_date(block_time)?;
        ledger.atomically(|tx| {
            MintTransition::new(tx, tx, &self.addresses).process_mint(request, &self.params, as_of)
        })
    }
}

fn as_of_date(block_time: BlockTime) -> Result<CalendarDate> {
    block_time
        .date()
        .map_err(|e| MintError::InvalidSchedule(ScheduleError::from(e)))
}

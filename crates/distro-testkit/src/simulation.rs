//! Seeded mint simulation.
//!
//! Drives a sequence of blocks with advancing block time. Each block carries
//! one random request from a random signer (authorized, unauthorized, or
//! malformed) and is committed atomically against a [`MemoryLedger`]. After
//! every block the supply must sit at or below the schedule limit, and the
//! limit strictly below max supply.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use distro::{
    BlockTime, DistroModule, MemoryLedger, MintError, MintRequest, ModuleConfig, ScheduleParams,
    SupplyOracle,
};

use crate::fixtures::{address, block_time};

/// Simulation settings.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub seed: u64,
    pub blocks: u64,
    pub block_interval_secs: i64,
    /// Number of issuing authorities.
    pub authorities: u8,
    /// Largest requested amount. Requests are uniform in `0..=max_amount`.
    pub max_amount: u64,
    pub params: ScheduleParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            blocks: 2_000,
            block_interval_secs: 6 * 60 * 60,
            authorities: 3,
            max_amount: 5_000,
            params: ScheduleParams::new(
                Vec::<String>::new(),
                address(0),
                "ugnod",
                1_000_000,
                "2025-01-01",
                12,
            ),
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub blocks: u64,
    pub committed: u64,
    pub minted: u64,
    /// Rejection counts by error kind.
    pub rejected: BTreeMap<&'static str, u64>,
    pub final_supply: u64,
    pub final_limit: u64,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Params failed to load, or the schedule could not be evaluated.
    #[error("module error: {0}")]
    Module(#[from] MintError),

    #[error("block {block}: supply {supply} exceeds limit {limit}")]
    SupplyAboveLimit { block: u64, supply: u64, limit: u64 },

    #[error("block {block}: limit {limit} reached max supply {max_supply}")]
    LimitReachedMax {
        block: u64,
        limit: u64,
        max_supply: u64,
    },
}

/// Run the simulation described by `config`.
///
/// Issuing authorities in `config.params` are replaced by
/// `config.authorities` derived addresses. The same config always yields the
/// same report.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationReport, SimulationError> {
    let authorities: Vec<String> = (1..=config.authorities.max(1)).map(address).collect();
    let outsider = address(u8::MAX);
    let params = ScheduleParams {
        issuing_authorities: authorities.iter().cloned().collect(),
        ..config.params.clone()
    };
    let denom = params.denom.clone();
    let max_supply = params.max_supply;

    let module = DistroModule::new(ModuleConfig::default(), params)?;
    let ledger: MemoryLedger = module.new_ledger();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let genesis = block_time(module.schedule().start()).unix_seconds();
    let mut report = SimulationReport {
        blocks: config.blocks,
        committed: 0,
        minted: 0,
        rejected: BTreeMap::new(),
        final_supply: 0,
        final_limit: 0,
    };

    for block in 0..config.blocks {
        let offset = i64::try_from(block)
            .unwrap_or(i64::MAX)
            .saturating_mul(config.block_interval_secs);
        let time = BlockTime::from_unix_seconds(genesis.saturating_add(offset));

        let signer = match rng.gen_range(0..10u8) {
            0 => "gnodi1bogus".to_string(),
            1 | 2 => outsider.clone(),
            _ => authorities[rng.gen_range(0..authorities.len())].clone(),
        };
        let request = MintRequest::new(signer, rng.gen_range(0..=config.max_amount));

        match module.handle_mint(&ledger, &request, time) {
            Ok(committed) => {
                report.committed += 1;
                report.minted += committed.amount;
            }
            Err(e) => *report.rejected.entry(e.kind()).or_default() += 1,
        }

        let supply = ledger.current_supply(&denom);
        let limit = module.schedule_snapshot(time)?.limit;
        if supply > limit {
            return Err(SimulationError::SupplyAboveLimit {
                block,
                supply,
                limit,
            });
        }
        if limit >= max_supply {
            return Err(SimulationError::LimitReachedMax {
                block,
                limit,
                max_supply,
            });
        }
        report.final_supply = supply;
        report.final_limit = limit;
    }

    tracing::debug!(
        seed = config.seed,
        blocks = report.blocks,
        committed = report.committed,
        minted = report.minted,
        final_supply = report.final_supply,
        "simulation finished"
    );
    Ok(report)
}

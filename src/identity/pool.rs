//! User agent rotation pool
//!
//! Maintains a fixed-size pool of pre-generated user agents for round-robin
//! and random distribution across concurrent workers. All state lives behind
//! one mutex so `get_next`, `get_random` and `refresh_pool` stay safe when
//! workers race; round-robin remains a full permutation visit of the pool.

use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{generator, Platform, PlatformSelector, UserAgent};
use crate::{Error, Result};

#[derive(Debug)]
struct PoolState {
    entries: Vec<UserAgent>,
    cursor: usize,
    rng: StdRng,
}

/// Shared user agent pool
#[derive(Debug)]
pub struct UserAgentPool {
    platforms: Vec<Platform>,
    pool_size: usize,
    state: Mutex<PoolState>,
}

impl UserAgentPool {
    /// Create a pool and eagerly fill it to `pool_size` entries.
    ///
    /// Each entry's platform is drawn uniformly from `platforms`, so the pool
    /// may legitimately contain duplicates.
    pub fn new(platforms: &[Platform], pool_size: usize) -> Result<Self> {
        Self::build(platforms, pool_size, StdRng::from_entropy())
    }

    /// Create a pool with a fixed seed, for reproducible contents
    pub fn with_seed(platforms: &[Platform], pool_size: usize, seed: u64) -> Result<Self> {
        Self::build(platforms, pool_size, StdRng::seed_from_u64(seed))
    }

    fn build(platforms: &[Platform], pool_size: usize, mut rng: StdRng) -> Result<Self> {
        if pool_size > 0 && platforms.is_empty() {
            return Err(Error::invalid_pool_config(
                "platform set must not be empty for a non-empty pool",
            ));
        }
        if platforms.contains(&Platform::Unknown) {
            return Err(Error::invalid_pool_config(
                "unknown platform is not generatable",
            ));
        }

        let entries = fill(&mut rng, platforms, pool_size)?;
        Ok(Self {
            platforms: platforms.to_vec(),
            pool_size,
            state: Mutex::new(PoolState {
                entries,
                cursor: 0,
                rng,
            }),
        })
    }

    /// Next user agent in round-robin order.
    ///
    /// Repeated calls cycle through the full pool before repeating any entry,
    /// in the fixed order established at the last fill or refresh.
    pub fn get_next(&self) -> Result<UserAgent> {
        let mut state = self.state.lock().expect("pool state poisoned");
        if state.entries.is_empty() {
            return Err(Error::EmptyPool);
        }

        let ua = state.entries[state.cursor].clone();
        state.cursor = (state.cursor + 1) % state.entries.len();
        Ok(ua)
    }

    /// Uniformly chosen entry; does not advance the round-robin cursor
    pub fn get_random(&self) -> Result<UserAgent> {
        let mut state = self.state.lock().expect("pool state poisoned");
        if state.entries.is_empty() {
            return Err(Error::EmptyPool);
        }

        let len = state.entries.len();
        let idx = state.rng.gen_range(0..len);
        Ok(state.entries[idx].clone())
    }

    /// Regenerate every entry and reset the cursor to the start.
    ///
    /// Prior entries are discarded entirely; there is no partial carry-over.
    pub fn refresh_pool(&self) -> Result<()> {
        let mut state = self.state.lock().expect("pool state poisoned");
        state.entries = fill(&mut state.rng, &self.platforms, self.pool_size)?;
        state.cursor = 0;
        tracing::info!("User agent pool refreshed ({} entries)", self.pool_size);
        Ok(())
    }

    /// Read-only snapshot of the pool in round-robin order
    pub fn snapshot(&self) -> Vec<UserAgent> {
        self.state
            .lock()
            .expect("pool state poisoned")
            .entries
            .clone()
    }

    /// Number of entries in the pool
    pub fn len(&self) -> usize {
        self.state.lock().expect("pool state poisoned").entries.len()
    }

    /// Whether the pool has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fill(rng: &mut StdRng, platforms: &[Platform], pool_size: usize) -> Result<Vec<UserAgent>> {
    tracing::debug!("Generating user agent pool of size {}", pool_size);

    let mut entries = Vec::with_capacity(pool_size);
    for _ in 0..pool_size {
        let platform = platforms[rng.gen_range(0..platforms.len())];
        entries.push(generator::generate_with_rng(
            rng,
            PlatformSelector::from(platform),
            None,
        )?);
    }

    entries.shuffle(rng);
    Ok(entries)
}

/// Handle to one long-lived shared pool.
///
/// Owned and passed around by whoever composes the system instead of hidden
/// module state. First construction wins: later `get_or_init` calls return
/// the existing pool unchanged, whatever parameters they pass.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    cell: OnceCell<Arc<UserAgentPool>>,
}

impl PoolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared pool, constructing it on first call
    pub fn get_or_init(&self, platforms: &[Platform], pool_size: usize) -> Result<Arc<UserAgentPool>> {
        if let Some(pool) = self.cell.get() {
            return Ok(pool.clone());
        }

        let pool = Arc::new(UserAgentPool::new(platforms, pool_size)?);
        Ok(self.cell.get_or_init(|| pool).clone())
    }

    /// The shared pool, if one has been constructed
    pub fn get(&self) -> Option<Arc<UserAgentPool>> {
        self.cell.get().cloned()
    }
}

//! Application state management.

use crate::config::Config;
use crate::error::AppError;
use fair_casino_core::{
    derive, issue_commitment,
    protocol::{PlayParams, PlayResponse},
    FairnessError, HouseLedger, RevealedRound, RoundId, RoundInput, RoundRecord, ServerSeed,
    ServerSeedHash,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
    ledger: Arc<HouseLedger>,
    recent_rounds_limit: usize,
    max_bet: u64,
    max_pending_commitments: usize,
}

/// A seed whose hash has been published but not yet played
struct PendingCommitment {
    server_seed: ServerSeed,
    issued: u64,
}

struct AppStateInner {
    pending: HashMap<ServerSeedHash, PendingCommitment>,
    /// Pending hashes by issue sequence, oldest first
    issue_order: BTreeMap<u64, ServerSeedHash>,
    next_issue: u64,
    /// Commitments already spent on a round
    consumed: HashSet<ServerSeedHash>,
    rounds: HashMap<RoundId, PlayResponse>,
    /// Round ids in settlement order
    history: Vec<RoundId>,
}

impl AppStateInner {
    fn take_pending(&mut self, hash: &ServerSeedHash) -> Option<ServerSeed> {
        let pending = self.pending.remove(hash)?;
        self.issue_order.remove(&pending.issued);
        Some(pending.server_seed)
    }

    fn evict_oldest(&mut self) {
        if let Some((_, hash)) = self.issue_order.pop_first() {
            self.pending.remove(&hash);
            debug!(commitment = %hash, "Evicted unplayed commitment");
        }
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStateInner {
                pending: HashMap::new(),
                issue_order: BTreeMap::new(),
                next_issue: 0,
                consumed: HashSet::new(),
                rounds: HashMap::new(),
                history: Vec::new(),
            })),
            ledger: Arc::new(HouseLedger::new(
                config.house_bankroll,
                config.ledger_event_capacity,
            )),
            recent_rounds_limit: config.recent_rounds_limit,
            max_bet: config.max_bet,
            max_pending_commitments: config.max_pending_commitments.max(1),
        }
    }

    pub fn ledger(&self) -> &Arc<HouseLedger> {
        &self.ledger
    }

    /// Draw a fresh server seed and publish only its hash.
    ///
    /// At most `max_pending_commitments` stay unplayed; the oldest is dropped
    /// to make room and can no longer be played.
    pub fn issue_commitment(&self) -> Result<ServerSeedHash, AppError> {
        let pair = issue_commitment()?;
        let hash = pair.server_seed_hash;

        let mut inner = self.lock();
        while inner.pending.len() >= self.max_pending_commitments {
            inner.evict_oldest();
        }
        let issued = inner.next_issue;
        inner.next_issue += 1;
        inner.issue_order.insert(issued, hash);
        inner.pending.insert(
            hash,
            PendingCommitment {
                server_seed: pair.server_seed,
                issued,
            },
        );
        drop(inner);

        info!(commitment = %hash, "Issued seed commitment");
        Ok(hash)
    }

    /// Settle a bet against a pending commitment, revealing its seed.
    ///
    /// The commitment is only spent once the ledger has booked the bet; any
    /// earlier failure leaves it pending.
    pub fn play(&self, params: PlayParams) -> Result<PlayResponse, AppError> {
        if params.bet > self.max_bet {
            return Err(FairnessError::InvalidField {
                field: "bet",
                reason: format!("must not exceed {}", self.max_bet),
            }
            .into());
        }

        let hash = params.server_seed_hash;
        let mut inner = self.lock();

        let server_seed = match inner.pending.get(&hash) {
            Some(pending) => pending.server_seed.clone(),
            None if inner.consumed.contains(&hash) => {
                return Err(AppError::CommitmentConsumed(hash))
            }
            None => return Err(AppError::UnknownCommitment(hash)),
        };

        let input = RoundInput::new(
            params.client_seed,
            server_seed,
            params.nonce,
            params.game_type,
        )?;
        let derivation = derive(&input);
        let settlement = params
            .game_type
            .settle(&derivation.outcome, &params.wager, params.bet)?;
        let snapshot = self.ledger.apply(params.bet, &settlement)?;

        inner.take_pending(&hash);
        inner.consumed.insert(hash);

        let record = RoundRecord::new(RevealedRound {
            client_seed: input.client_seed,
            server_seed: input.server_seed,
            server_seed_hash: hash,
            nonce: input.nonce,
            game_type: input.game_type,
            result: derivation.outcome,
        });

        info!(
            round = %record.id,
            game = %record.round.game_type,
            bet = params.bet,
            win = settlement.is_win,
            winnings = settlement.winnings,
            house_balance = snapshot.balance,
            "Settled round"
        );

        let response = PlayResponse {
            round: record,
            bet: params.bet,
            wager: params.wager,
            settlement,
        };
        inner.history.push(response.round.id);
        inner.rounds.insert(response.round.id, response.clone());
        Ok(response)
    }

    pub fn round(&self, id: RoundId) -> Result<PlayResponse, AppError> {
        self.lock()
            .rounds
            .get(&id)
            .cloned()
            .ok_or(AppError::RoundNotFound(id))
    }

    /// Most recently settled rounds, newest first
    pub fn recent_rounds(&self) -> Vec<PlayResponse> {
        self.recent_matching(|_| true)
    }

    /// Most recent winning rounds, newest first
    pub fn recent_wins(&self) -> Vec<PlayResponse> {
        self.recent_matching(|played| played.settlement.is_win)
    }

    pub fn pending_commitments(&self) -> usize {
        self.lock().pending.len()
    }

    fn recent_matching<P>(&self, predicate: P) -> Vec<PlayResponse>
    where
        P: Fn(&PlayResponse) -> bool,
    {
        let inner = self.lock();
        inner
            .history
            .iter()
            .rev()
            .filter_map(|id| inner.rounds.get(id))
            .filter(|played| predicate(played))
            .take(self.recent_rounds_limit)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, AppStateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

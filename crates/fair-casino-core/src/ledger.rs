//! House bankroll bookkeeping with change notifications.

use crate::error::FairnessError;
use crate::games::Settlement;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

/// Point-in-time view of the house's books
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub balance: i64,
    pub total_wagered: u64,
    pub total_paid_out: u64,
    pub profit_loss: i64,
    pub rounds_settled: u64,
}

impl LedgerSnapshot {
    /// Books after one more settled bet
    fn book(&self, bet: u64, settlement: &Settlement) -> Result<Self, FairnessError> {
        let stake = to_signed(bet, "bet")?;
        let mut next = *self;
        next.total_wagered = self
            .total_wagered
            .checked_add(bet)
            .ok_or(FairnessError::LedgerOverflow("totalWagered"))?;
        next.rounds_settled = self
            .rounds_settled
            .checked_add(1)
            .ok_or(FairnessError::LedgerOverflow("roundsSettled"))?;

        if settlement.is_win {
            let payout = to_signed(settlement.winnings, "winnings")?;
            next.balance = self
                .balance
                .checked_sub(payout)
                .ok_or(FairnessError::LedgerOverflow("balance"))?;
            next.total_paid_out = self
                .total_paid_out
                .checked_add(settlement.winnings)
                .ok_or(FairnessError::LedgerOverflow("totalPaidOut"))?;
            next.profit_loss = payout
                .checked_sub(stake)
                .and_then(|net| self.profit_loss.checked_sub(net))
                .ok_or(FairnessError::LedgerOverflow("profitLoss"))?;
        } else {
            next.balance = self
                .balance
                .checked_add(stake)
                .ok_or(FairnessError::LedgerOverflow("balance"))?;
            next.profit_loss = self
                .profit_loss
                .checked_add(stake)
                .ok_or(FairnessError::LedgerOverflow("profitLoss"))?;
        }
        Ok(next)
    }
}

fn to_signed(amount: u64, what: &'static str) -> Result<i64, FairnessError> {
    i64::try_from(amount).map_err(|_| FairnessError::LedgerOverflow(what))
}

/// Emitted after every settled bet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEvent {
    pub bet: u64,
    pub settlement: Settlement,
    pub snapshot: LedgerSnapshot,
}

/// The house's side of every wager.
///
/// Owned by whoever settles rounds and shared by reference; subscribers get
/// a [`broadcast::Receiver`] instead of registering callbacks.
pub struct HouseLedger {
    books: Mutex<LedgerSnapshot>,
    events: broadcast::Sender<LedgerEvent>,
}

impl HouseLedger {
    pub fn new(bankroll: i64, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            books: Mutex::new(LedgerSnapshot {
                balance: bankroll,
                ..LedgerSnapshot::default()
            }),
            events,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        *self.books()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Book a settled bet and notify subscribers.
    ///
    /// All totals are checked; on overflow the books are left untouched.
    pub fn apply(
        &self,
        bet: u64,
        settlement: &Settlement,
    ) -> Result<LedgerSnapshot, FairnessError> {
        let snapshot = {
            let mut books = self.books();
            let next = books.book(bet, settlement)?;
            *books = next;
            next
        };

        let event = LedgerEvent {
            bet,
            settlement: *settlement,
            snapshot,
        };
        // No receivers is fine
        if self.events.send(event).is_err() {
            debug!("ledger event dropped, no subscribers");
        }
        Ok(snapshot)
    }

    fn books(&self) -> MutexGuard<'_, LedgerSnapshot> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

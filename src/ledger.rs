use crate::{GameError, Result};

/// Player balance and the fixed stake of every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: u64,
    current_bet: u64,
}

impl Ledger {
    pub fn new(balance: u64, current_bet: u64) -> Self {
        Self {
            balance,
            current_bet,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    /// Withdraws `amount`, or fails without touching the balance.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(GameError::InsufficientFunds {
                balance: self.balance,
                required: amount,
            })?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let mut ledger = Ledger::new(1000, 300);

        ledger.debit(300).unwrap();
        assert_eq!(ledger.balance(), 700);

        ledger.credit(600);
        assert_eq!(ledger.balance(), 1300);
        assert_eq!(ledger.current_bet(), 300);
    }

    #[test]
    fn test_insufficient_funds_is_atomic() {
        let mut ledger = Ledger::new(100, 300);

        assert_eq!(
            ledger.debit(300),
            Err(GameError::InsufficientFunds {
                balance: 100,
                required: 300
            })
        );
        assert_eq!(ledger.balance(), 100);
        assert!(!ledger.can_afford(300));
    }

    #[test]
    fn test_debit_to_zero() {
        let mut ledger = Ledger::new(300, 300);
        assert!(ledger.debit(300).is_ok());
        assert_eq!(ledger.balance(), 0);
        assert!(ledger.debit(1).is_err());
    }
}

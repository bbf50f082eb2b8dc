use std::collections::{HashMap, HashSet};

use tessera_core::{Address, ClassId};

use crate::error::LedgerError;

/// In-memory multi-asset ledger.
///
/// Every mutating primitive is all-or-nothing: batch operations validate
/// the full batch before the first balance is touched, so a failure never
/// leaves a partial move behind.
#[derive(Debug, Default)]
pub struct AssetLedger {
    /// (holder, class) → quantity. Absent entries read as zero.
    balances: HashMap<(Address, ClassId), u64>,
    /// class → outstanding supply.
    supply: HashMap<ClassId, u64>,
    /// (holder, operator) pairs with standing approval.
    approvals: HashSet<(Address, Address)>,
}

impl AssetLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `holder` for `class_id`.
    pub fn balance_of(&self, holder: Address, class_id: ClassId) -> u64 {
        self.balances.get(&(holder, class_id)).copied().unwrap_or(0)
    }

    /// Outstanding supply of `class_id`.
    pub fn total_supply(&self, class_id: ClassId) -> u64 {
        self.supply.get(&class_id).copied().unwrap_or(0)
    }

    /// Grant or revoke `operator`'s standing approval to act for `holder`.
    pub fn set_operator_approval(&mut self, holder: Address, operator: Address, approved: bool) {
        if approved {
            self.approvals.insert((holder, operator));
        } else {
            self.approvals.remove(&(holder, operator));
        }
        tracing::debug!(
            holder = %holder,
            operator = %operator,
            approved,
            "operator approval updated"
        );
    }

    /// Whether `operator` may act for `holder`.
    pub fn is_approved(&self, holder: Address, operator: Address) -> bool {
        self.approvals.contains(&(holder, operator))
    }

    /// Create `amount` new units of `class_id` for `to`.
    pub fn mint(
        &mut self,
        to: Address,
        class_id: ClassId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let balance = self.balances.entry((to, class_id)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                holder: to,
                class_id,
            })?;
        *self.supply.entry(class_id).or_insert(0) += amount;
        Ok(())
    }

    /// Destroy `amount` units of `class_id` held by `holder`.
    pub fn burn(
        &mut self,
        holder: Address,
        class_id: ClassId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let have = self.balance_of(holder, class_id);
        if have < amount {
            return Err(LedgerError::InsufficientBalance {
                holder,
                class_id,
                have,
                need: amount,
            });
        }
        self.debit(holder, class_id, amount);
        if let Some(s) = self.supply.get_mut(&class_id) {
            *s -= amount;
        }
        Ok(())
    }

    /// Destroy several classes held by `holder` in one atomic batch.
    pub fn burn_batch(
        &mut self,
        holder: Address,
        pairs: &[(ClassId, u64)],
    ) -> Result<(), LedgerError> {
        if pairs.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }
        self.check_debits(holder, pairs)?;
        for &(class_id, amount) in pairs {
            self.debit(holder, class_id, amount);
            if let Some(s) = self.supply.get_mut(&class_id) {
                *s -= amount;
            }
        }
        Ok(())
    }

    /// Move several classes from `from` to `to` in one atomic batch.
    ///
    /// Supply is unchanged; only the holder changes.
    pub fn move_batch(
        &mut self,
        from: Address,
        to: Address,
        pairs: &[(ClassId, u64)],
    ) -> Result<(), LedgerError> {
        if pairs.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }
        self.check_debits(from, pairs)?;
        // Credits are overflow-checked before the first balance is touched.
        let mut credited: HashMap<ClassId, u64> = HashMap::new();
        for &(class_id, amount) in pairs {
            *credited.entry(class_id).or_insert(0) += amount;
        }
        for (&class_id, &amount) in &credited {
            self.balance_of(to, class_id)
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow {
                    holder: to,
                    class_id,
                })?;
        }
        for &(class_id, amount) in pairs {
            self.debit(from, class_id, amount);
        }
        for (&class_id, &amount) in &credited {
            *self.balances.entry((to, class_id)).or_insert(0) += amount;
        }
        Ok(())
    }

    /// Validate that every debit in `pairs` is payable by `holder`.
    fn check_debits(&self, holder: Address, pairs: &[(ClassId, u64)]) -> Result<(), LedgerError> {
        let mut needed: HashMap<ClassId, u64> = HashMap::new();
        for &(class_id, amount) in pairs {
            if amount == 0 {
                return Err(LedgerError::ZeroAmount);
            }
            *needed.entry(class_id).or_insert(0) += amount;
        }
        for (&class_id, &need) in &needed {
            let have = self.balance_of(holder, class_id);
            if have < need {
                return Err(LedgerError::InsufficientBalance {
                    holder,
                    class_id,
                    have,
                    need,
                });
            }
        }
        Ok(())
    }

    fn debit(&mut self, holder: Address, class_id: ClassId, amount: u64) {
        match self.balances.get_mut(&(holder, class_id)) {
            Some(b) if *b > amount => *b -= amount,
            _ => {
                // Fully drained entries are removed so untouched reads stay zero.
                self.balances.remove(&(holder, class_id));
            }
        }
    }
}

use std::collections::HashSet;

use tessera_core::Address;

use crate::error::EngineError;

/// Owner, pause switch, and minter-set membership.
#[derive(Debug)]
pub struct AccessControl {
    owner: Address,
    paused: bool,
    minters: HashSet<Address>,
}

impl AccessControl {
    /// Create with the given owner, unpaused, empty minter set.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            paused: false,
            minters: HashSet::new(),
        }
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whether the pause switch is on.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether `addr` is a minter-set member.
    pub fn is_minter(&self, addr: Address) -> bool {
        self.minters.contains(&addr)
    }

    /// Fail unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: Address) -> Result<(), EngineError> {
        if caller != self.owner {
            return Err(EngineError::NotOwner(caller));
        }
        Ok(())
    }

    /// Fail unless `caller` is a minter-set member.
    pub fn ensure_minter(&self, caller: Address) -> Result<(), EngineError> {
        if !self.minters.contains(&caller) {
            return Err(EngineError::NotMinter(caller));
        }
        Ok(())
    }

    /// Fail while paused.
    pub fn ensure_not_paused(&self) -> Result<(), EngineError> {
        if self.paused {
            return Err(EngineError::Paused);
        }
        Ok(())
    }

    /// Turn the pause switch on. Fails if already paused.
    pub fn pause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        if self.paused {
            return Err(EngineError::Paused);
        }
        self.paused = true;
        tracing::info!(owner = %caller, "engine paused");
        Ok(())
    }

    /// Turn the pause switch off. Fails if not paused.
    pub fn unpause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        if !self.paused {
            return Err(EngineError::NotPaused);
        }
        self.paused = false;
        tracing::info!(owner = %caller, "engine unpaused");
        Ok(())
    }

    /// Add `minter` to the minter set. Duplicate adds are an error.
    pub fn add_minter(&mut self, caller: Address, minter: Address) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.ensure_not_paused()?;
        if !self.minters.insert(minter) {
            return Err(EngineError::MinterAlreadyPresent(minter));
        }
        tracing::info!(minter = %minter, "minter added");
        Ok(())
    }

    /// Remove `minter` from the minter set. Removing an absent minter is an error.
    pub fn remove_minter(&mut self, caller: Address, minter: Address) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.ensure_not_paused()?;
        if !self.minters.remove(&minter) {
            return Err(EngineError::MinterNotPresent(minter));
        }
        tracing::info!(minter = %minter, "minter removed");
        Ok(())
    }

    /// One-step ownership transfer.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        tracing::info!(previous = %previous, new = %new_owner, "ownership transferred");
        Ok(())
    }
}

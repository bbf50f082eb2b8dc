use std::collections::HashMap;

use chrono::{DateTime, Utc};

use tessera_core::{Address, CallContext, ClassId, EngineConfig, MintPolicy};
use tessera_crypto::PublicKey;
use tessera_ledger::AssetLedger;

use crate::access::AccessControl;
use crate::authorization::{MintAuthorization, NonceRegistry};
use crate::error::EngineError;
use crate::events::{ClassCreated, IssuanceReceipt, RecoveryReceipt};
use crate::registry::{ClassRegistry, CredentialClass};
use crate::treasury::{TreasuryVault, ValueSink};

/// The soulbound credential engine.
///
/// One value of this type is the root state object of a deployment. All
/// state-mutating operations take `&mut self` plus an explicit
/// [`CallContext`], so the hosting ledger's serial ordering is the only
/// concurrency model and no operation can re-enter another.
///
/// Balances move only through mint, burn, and recovery; every other
/// transfer surface fails with [`EngineError::NonTransferable`].
pub struct SoulboundEngine {
    config: EngineConfig,
    access: AccessControl,
    registry: ClassRegistry,
    ledger: AssetLedger,
    nonces: NonceRegistry,
    signer: PublicKey,
    treasury: Address,
    sink: Box<dyn ValueSink>,
    /// old holder → new holder standing recovery approvals, single-use.
    recovery_approvals: HashMap<Address, Address>,
}

impl SoulboundEngine {
    /// Create an engine with an in-memory treasury vault.
    pub fn new(
        config: EngineConfig,
        owner: Address,
        signer: PublicKey,
        treasury: Address,
    ) -> Self {
        Self::with_sink(config, owner, signer, treasury, Box::new(TreasuryVault::new()))
    }

    /// Create an engine forwarding value into the given sink.
    pub fn with_sink(
        config: EngineConfig,
        owner: Address,
        signer: PublicKey,
        treasury: Address,
        sink: Box<dyn ValueSink>,
    ) -> Self {
        Self {
            config,
            access: AccessControl::new(owner),
            registry: ClassRegistry::new(),
            ledger: AssetLedger::new(),
            nonces: NonceRegistry::new(),
            signer,
            treasury,
            sink,
            recovery_approvals: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------

    /// Register a new credential class and return its creation record.
    ///
    /// Owner-only, unpaused-only. Ids are assigned by a single counter
    /// with no gaps or reuse.
    pub fn create_class(
        &mut self,
        ctx: CallContext,
        name: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        price: u128,
    ) -> Result<ClassCreated, EngineError> {
        self.access.ensure_owner(ctx.caller)?;
        self.access.ensure_not_paused()?;
        let class_id = self.registry.create(CredentialClass {
            name: name.into(),
            description: description.into(),
            creator: ctx.caller,
            registered_at: ctx.now,
            start,
            end,
            price,
        });
        Ok(ClassCreated::new(class_id, ctx.caller))
    }

    /// True iff `class_id` has been created.
    pub fn is_created(&self, class_id: ClassId) -> bool {
        self.registry.is_created(class_id)
    }

    /// Metadata of a created class.
    pub fn class(&self, class_id: ClassId) -> Result<&CredentialClass, EngineError> {
        self.registry.get(class_id)
    }

    /// The next id the registry will assign.
    pub fn next_class_id(&self) -> u64 {
        self.registry.next_id()
    }

    /// Metadata URI for a created class: `base_uri` + decimal id, or the
    /// empty string when no base URI is configured.
    pub fn class_uri(&self, class_id: ClassId) -> Result<String, EngineError> {
        self.registry.get(class_id)?;
        if self.config.base_uri.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}{}", self.config.base_uri, class_id))
    }

    // -----------------------------------------------------------------
    // Issuance
    // -----------------------------------------------------------------

    /// Mint one unit of `class_id` to `to`.
    ///
    /// Preconditions are checked in a fixed order, each with a distinct
    /// error: pause, existence, window start, window end, authorization.
    /// Which authorization path applies is fixed per deployment by
    /// [`MintPolicy`]; the role path treats attached value as a
    /// voluntary donation, the signed-claim path enforces the class
    /// price and one claim per holder.
    pub fn mint(
        &mut self,
        ctx: CallContext,
        to: Address,
        class_id: ClassId,
        authorization: Option<&MintAuthorization>,
    ) -> Result<IssuanceReceipt, EngineError> {
        self.access.ensure_not_paused()?;
        let price = {
            let class = self.registry.get(class_id)?;
            if ctx.now < class.start {
                return Err(EngineError::MintNotStarted(class_id));
            }
            if let Some(end) = class.end {
                if ctx.now >= end {
                    return Err(EngineError::MintEnded(class_id));
                }
            }
            class.price
        };

        match self.config.mint_policy {
            MintPolicy::MinterRole => {
                self.access.ensure_minter(ctx.caller)?;
            }
            MintPolicy::SignedClaim => {
                let auth = authorization.ok_or(EngineError::InvalidSignature)?;
                if auth.recipient != to
                    || auth.class_id != class_id
                    || auth.domain != self.config.domain
                    || auth.price != price
                {
                    return Err(EngineError::InvalidSignature);
                }
                if auth.deadline < ctx.now {
                    return Err(EngineError::AuthorizationExpired(auth.deadline));
                }
                if ctx.value < price {
                    return Err(EngineError::InsufficientValue {
                        attached: ctx.value,
                        required: price,
                    });
                }
                if self.ledger.balance_of(to, class_id) > 0 {
                    return Err(EngineError::AlreadyClaimed {
                        holder: to,
                        class_id,
                    });
                }
                let nonce = self.nonces.nonce_of(to);
                auth.verify_against(&self.signer, to, class_id, price, self.config.domain, nonce)?;
                self.nonces.consume(to);
            }
        }

        self.ledger.mint(to, class_id, 1)?;
        // Value leaves the engine only after every mutation is applied.
        self.sink.forward(ctx.caller, self.treasury, ctx.value);
        tracing::info!(
            holder = %to,
            class_id = %class_id,
            value = ctx.value,
            "credential issued"
        );
        Ok(IssuanceReceipt::new(to, class_id, ctx.value))
    }

    // -----------------------------------------------------------------
    // Burn
    // -----------------------------------------------------------------

    /// Destroy `amount` units of `class_id` held by `holder`.
    ///
    /// Callable by the holder or an approved operator; deliberately not
    /// pause-gated so holders can always shed credentials.
    pub fn burn(
        &mut self,
        ctx: CallContext,
        holder: Address,
        class_id: ClassId,
        amount: u64,
    ) -> Result<(), EngineError> {
        self.ensure_holder_or_operator(ctx.caller, holder)?;
        self.ledger.burn(holder, class_id, amount)?;
        tracing::info!(holder = %holder, class_id = %class_id, amount, "credentials burned");
        Ok(())
    }

    /// Destroy several classes held by `holder` in one atomic batch.
    pub fn burn_batch(
        &mut self,
        ctx: CallContext,
        holder: Address,
        pairs: &[(ClassId, u64)],
    ) -> Result<(), EngineError> {
        self.ensure_holder_or_operator(ctx.caller, holder)?;
        self.ledger.burn_batch(holder, pairs)?;
        tracing::info!(holder = %holder, classes = pairs.len(), "credential batch burned");
        Ok(())
    }

    /// Grant or revoke `operator`'s standing approval to burn for the caller.
    pub fn set_operator_approval(
        &mut self,
        ctx: CallContext,
        operator: Address,
        approved: bool,
    ) {
        self.ledger
            .set_operator_approval(ctx.caller, operator, approved);
    }

    /// Whether `operator` may act for `holder`.
    pub fn is_approved_operator(&self, holder: Address, operator: Address) -> bool {
        self.ledger.is_approved(holder, operator)
    }

    fn ensure_holder_or_operator(
        &self,
        caller: Address,
        holder: Address,
    ) -> Result<(), EngineError> {
        if caller != holder && !self.ledger.is_approved(holder, caller) {
            return Err(EngineError::NotApprovedOperator { caller, holder });
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Recovery
    // -----------------------------------------------------------------

    /// Pre-approve `new_holder` as the destination of a recovery of the
    /// caller's credentials. The approval is single-use; a later call
    /// overwrites it.
    pub fn approve_recovery(&mut self, ctx: CallContext, new_holder: Address) {
        self.recovery_approvals.insert(ctx.caller, new_holder);
        tracing::info!(
            old_holder = %ctx.caller,
            new_holder = %new_holder,
            "recovery approved by holder"
        );
    }

    /// Move every non-zero balance of `old_holder` to `new_holder`.
    ///
    /// Caller must be a minter-set member, the engine unpaused, and
    /// `old_holder` must have pre-approved `new_holder`. This is one of
    /// the two sanctioned paths around the non-transfer restriction.
    pub fn recover(
        &mut self,
        ctx: CallContext,
        old_holder: Address,
        new_holder: Address,
    ) -> Result<RecoveryReceipt, EngineError> {
        self.access.ensure_not_paused()?;
        self.access.ensure_minter(ctx.caller)?;
        if self.recovery_approvals.get(&old_holder) != Some(&new_holder) {
            return Err(EngineError::RecoveryNotApproved {
                old_holder,
                new_holder,
            });
        }

        // Compact the sparse balance row into (id, balance) pairs.
        let mut moved: Vec<(ClassId, u64)> = Vec::new();
        for class_id in self.registry.ids() {
            let balance = self.ledger.balance_of(old_holder, class_id);
            if balance > 0 {
                moved.push((class_id, balance));
            }
        }
        if moved.is_empty() {
            return Err(EngineError::NothingToRecover(old_holder));
        }

        self.ledger.move_batch(old_holder, new_holder, &moved)?;
        self.recovery_approvals.remove(&old_holder);
        tracing::info!(
            old_holder = %old_holder,
            new_holder = %new_holder,
            classes = moved.len(),
            "credentials recovered"
        );
        Ok(RecoveryReceipt::new(old_holder, new_holder, moved))
    }

    // -----------------------------------------------------------------
    // Transfer guard
    // -----------------------------------------------------------------

    /// Direct transfer surface.
    ///
    /// Credentials are soulbound: unless the caller holds the privileged
    /// recovery role, every transfer fails with `NonTransferable`
    /// regardless of quantity or approval.
    pub fn transfer(
        &mut self,
        ctx: CallContext,
        from: Address,
        to: Address,
        class_id: ClassId,
        amount: u64,
    ) -> Result<(), EngineError> {
        if !self.access.is_minter(ctx.caller) {
            return Err(EngineError::NonTransferable);
        }
        self.access.ensure_not_paused()?;
        self.ledger.move_batch(from, to, &[(class_id, amount)])?;
        tracing::info!(
            from = %from,
            to = %to,
            class_id = %class_id,
            amount,
            "privileged transfer"
        );
        Ok(())
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    /// Toggle the pause switch on.
    pub fn pause(&mut self, ctx: CallContext) -> Result<(), EngineError> {
        self.access.pause(ctx.caller)
    }

    /// Toggle the pause switch off.
    pub fn unpause(&mut self, ctx: CallContext) -> Result<(), EngineError> {
        self.access.unpause(ctx.caller)
    }

    /// Add a minter-set member.
    pub fn add_minter(&mut self, ctx: CallContext, minter: Address) -> Result<(), EngineError> {
        self.access.add_minter(ctx.caller, minter)
    }

    /// Remove a minter-set member.
    pub fn remove_minter(&mut self, ctx: CallContext, minter: Address) -> Result<(), EngineError> {
        self.access.remove_minter(ctx.caller, minter)
    }

    /// Transfer ownership to a new identity.
    pub fn transfer_ownership(
        &mut self,
        ctx: CallContext,
        new_owner: Address,
    ) -> Result<(), EngineError> {
        self.access.transfer_ownership(ctx.caller, new_owner)
    }

    /// Rotate the trusted signer.
    ///
    /// Deliberately not pause-gated: rotation is the emergency kill
    /// switch for all unconsumed signed authorizations.
    pub fn set_signer(&mut self, ctx: CallContext, signer: PublicKey) -> Result<(), EngineError> {
        self.access.ensure_owner(ctx.caller)?;
        self.signer = signer;
        tracing::info!(signer = %signer.to_hex(), "trusted signer rotated");
        Ok(())
    }

    /// Rotate the treasury identity.
    pub fn set_treasury(&mut self, ctx: CallContext, treasury: Address) -> Result<(), EngineError> {
        self.access.ensure_owner(ctx.caller)?;
        self.access.ensure_not_paused()?;
        self.treasury = treasury;
        tracing::info!(treasury = %treasury, "treasury rotated");
        Ok(())
    }

    /// Change the base metadata URI.
    pub fn set_base_uri(
        &mut self,
        ctx: CallContext,
        base_uri: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.access.ensure_owner(ctx.caller)?;
        self.access.ensure_not_paused()?;
        self.config.base_uri = base_uri.into();
        tracing::info!(base_uri = %self.config.base_uri, "base URI changed");
        Ok(())
    }

    /// Forward unsolicited value to the treasury.
    pub fn donate(&mut self, ctx: CallContext) {
        self.sink.forward(ctx.caller, self.treasury, ctx.value);
    }

    // -----------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    /// Whether the engine is paused.
    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    /// Whether `addr` is a minter-set member.
    pub fn is_minter(&self, addr: Address) -> bool {
        self.access.is_minter(addr)
    }

    /// Balance of `holder` for `class_id`.
    pub fn balance_of(&self, holder: Address, class_id: ClassId) -> u64 {
        self.ledger.balance_of(holder, class_id)
    }

    /// Outstanding supply of `class_id`.
    pub fn total_supply(&self, class_id: ClassId) -> u64 {
        self.ledger.total_supply(class_id)
    }

    /// The holder's current signed-claim nonce.
    pub fn nonce_of(&self, holder: Address) -> u64 {
        self.nonces.nonce_of(holder)
    }

    /// The trusted signer's public key.
    pub fn signer(&self) -> PublicKey {
        self.signer
    }

    /// The treasury identity.
    pub fn treasury(&self) -> Address {
        self.treasury
    }

    /// Cumulative value received by the current treasury.
    pub fn treasury_received(&self) -> u128 {
        self.sink.received_by(self.treasury)
    }

    /// The deployment configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

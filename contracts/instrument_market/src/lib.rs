#![no_std]

mod catalog;
mod collateral;
mod error;
mod events;
mod purchase;
mod redemption;
mod referral;
mod rewards;
mod storage;
mod treasury;
mod types;


use catalog::Catalog;
pub use error::Error;
use purchase::PurchaseOps;
use redemption::RedemptionOps;
use referral::Referrals;
use storage::Storage;
use treasury::Treasury;
pub use types::{Accounting, Instrument, Purchase};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

/// Marketplace ledger for collateral-backed instruments: issuance, purchase
/// with referral bonuses, and redemption with time-prorated rewards.
#[contract]
pub struct InstrumentMarket;

#[contractimpl]
impl InstrumentMarket {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        owner: Address,
        collateral_token: Address,
        payment_token: Address,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        Storage::initialize(&env, &owner, &collateral_token, &payment_token);

        Ok(())
    }

    // ============================================
    // REFERRAL REGISTRY
    // ============================================

    /// Bind `participant` to `referrer`, once
    ///
    /// # Errors
    /// - `ReferrerAlreadyBound`: Participant already has a referrer
    /// - `InvalidReferrer`: Referrer is the participant or one of its descendants
    pub fn register_referrer(env: Env, participant: Address, referrer: Address) -> Result<(), Error> {
        Referrals::register(&env, &participant, &referrer)
    }

    // ============================================
    // INSTRUMENT CATALOG
    // ============================================

    /// List a batch of collateral units for sale (owner only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidQuantity`: Units, price or validity is zero
    /// - `InvalidRate`: Reward rate is 0 or above 10,000 basis points
    /// - `InsufficientCollateralBalance`: Owner holds fewer units
    pub fn create_instrument(
        env: Env,
        collateral_id: u32,
        total_units: i128,
        price_per_unit: i128,
        reward_rate_bps: u32,
        validity: u64,
    ) -> Result<u32, Error> {
        Catalog::create_instrument(
            &env,
            collateral_id,
            total_units,
            price_per_unit,
            reward_rate_bps,
            validity,
        )
    }

    // ============================================
    // PURCHASE
    // ============================================

    /// # Errors
    /// - `InvalidQuantity`: Units <= 0
    /// - `InstrumentNotFound`: Unknown item id
    /// - `InsufficientInstrumentSupply`: Not enough units left
    /// - `InsufficientPayerBalance`: Buyer cannot pay the principal
    /// - `InsufficientRewardPool`: Pool cannot pay referral bonuses
    pub fn purchase(env: Env, buyer: Address, item_id: u32, units: i128) -> Result<u64, Error> {
        PurchaseOps::purchase(&env, &buyer, item_id, units)
    }

    // ============================================
    // REDEMPTION
    // ============================================

    /// Returns the amount paid to the buyer.
    ///
    /// # Errors
    /// - `PurchaseNotFound`: Unknown or already redeemed purchase
    /// - `Unauthorized`: Caller is not the buyer
    /// - `InsufficientUnitsToReturn`: Caller no longer holds the units
    /// - `InsufficientRewardPool`: Pool cannot pay referrer accruals
    /// - `InsufficientCapitalPool`: Pool cannot pay principal and reward
    pub fn redeem(env: Env, caller: Address, purchase_id: u64) -> Result<i128, Error> {
        RedemptionOps::redeem(&env, &caller, purchase_id)
    }

    // ============================================
    // TREASURY
    // ============================================

    /// # Errors
    /// - `NoWithdrawableBalance`: Nothing outside the penalty pot
    pub fn withdraw_balance(env: Env) -> Result<i128, Error> {
        Treasury::withdraw_balance(&env)
    }

    /// Pays the part of the penalty pot the balance backs.
    ///
    /// # Errors
    /// - `NoPenaltyBalance`: No penalties collected, or none of them backed
    pub fn withdraw_penalty(env: Env) -> Result<i128, Error> {
        Treasury::withdraw_penalty(&env)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_instrument(env: Env, item_id: u32) -> Result<Instrument, Error> {
        Storage::get_instrument(&env, item_id)
    }

    pub fn get_purchase(env: Env, purchase_id: u64) -> Result<Purchase, Error> {
        Storage::get_purchase(&env, purchase_id)
    }

    pub fn get_referrer(env: Env, participant: Address) -> Option<Address> {
        Storage::get_referrer(&env, &participant)
    }

    /// Paid ancestors of `participant`, nearest first
    pub fn referral_chain(env: Env, participant: Address) -> Vec<Address> {
        Referrals::chain(&env, &participant)
    }

    pub fn get_accounting(env: Env) -> Accounting {
        Storage::get_accounting(&env)
    }

    pub fn total_outstanding_principal(env: Env) -> i128 {
        Storage::get_accounting(&env).total_outstanding_principal
    }

    pub fn total_expected_reward(env: Env) -> i128 {
        Storage::get_accounting(&env).total_expected_reward
    }

    pub fn collected_penalty(env: Env) -> i128 {
        Storage::get_accounting(&env).collected_penalty
    }

    /// Payment balance available for payouts (excludes the penalty pot)
    pub fn reward_pool(env: Env) -> Result<i128, Error> {
        let payment = token::Client::new(&env, &Storage::get_payment_token(&env)?);
        Ok(Treasury::reward_pool(&env, &payment))
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Storage::get_owner(&env)
    }
}

use crate::error::Error;
use crate::types::{Accounting, DataKey, Instrument, Purchase};
use soroban_sdk::{Address, Env};

pub struct Storage;

impl Storage {
    // Configuration
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn initialize(env: &Env, owner: &Address, collateral: &Address, payment: &Address) {
        let instance = env.storage().instance();
        instance.set(&DataKey::Initialized, &true);
        instance.set(&DataKey::Owner, owner);
        instance.set(&DataKey::CollateralToken, collateral);
        instance.set(&DataKey::PaymentToken, payment);
        instance.set(&DataKey::ItemCounter, &0u32);
        instance.set(&DataKey::PurchaseCounter, &0u64);
        instance.set(&DataKey::Accounting, &Accounting::default());
    }

    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_collateral_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::CollateralToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_payment_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)
    }

    // Id counters
    pub fn next_item_id(env: &Env) -> Result<u32, Error> {
        let current: u32 = env
            .storage()
            .instance()
            .get(&DataKey::ItemCounter)
            .unwrap_or(0);
        let next = current.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::ItemCounter, &next);
        Ok(next)
    }

    pub fn next_purchase_id(env: &Env) -> Result<u64, Error> {
        let current: u64 = env
            .storage()
            .instance()
            .get(&DataKey::PurchaseCounter)
            .unwrap_or(0);
        let next = current.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::PurchaseCounter, &next);
        Ok(next)
    }

    // Aggregates
    pub fn get_accounting(env: &Env) -> Accounting {
        env.storage()
            .instance()
            .get(&DataKey::Accounting)
            .unwrap_or_default()
    }

    pub fn set_accounting(env: &Env, accounting: &Accounting) {
        env.storage()
            .instance()
            .set(&DataKey::Accounting, accounting);
    }

    // Instruments
    pub fn get_instrument(env: &Env, item_id: u32) -> Result<Instrument, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Instrument(item_id))
            .ok_or(Error::InstrumentNotFound)
    }

    pub fn set_instrument(env: &Env, instrument: &Instrument) {
        env.storage()
            .persistent()
            .set(&DataKey::Instrument(instrument.item_id), instrument);
    }

    // Purchases
    pub fn get_purchase(env: &Env, purchase_id: u64) -> Result<Purchase, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Purchase(purchase_id))
            .ok_or(Error::PurchaseNotFound)
    }

    pub fn set_purchase(env: &Env, purchase: &Purchase) {
        env.storage()
            .persistent()
            .set(&DataKey::Purchase(purchase.purchase_id), purchase);
    }

    pub fn remove_purchase(env: &Env, purchase_id: u64) {
        env.storage()
            .persistent()
            .remove(&DataKey::Purchase(purchase_id));
    }

    // Referral edges
    pub fn get_referrer(env: &Env, participant: &Address) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Referrer(participant.clone()))
    }

    pub fn set_referrer(env: &Env, participant: &Address, referrer: &Address) {
        env.storage()
            .persistent()
            .set(&DataKey::Referrer(participant.clone()), referrer);
    }
}

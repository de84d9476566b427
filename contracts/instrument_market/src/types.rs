use soroban_sdk::{contracttype, Address};

// Constants
pub const BASIS_POINTS: i128 = 10_000; // 100% = 10,000 basis points
pub const MAX_REWARD_RATE_BPS: u32 = 10_000;

/// Referral levels paid on every purchase and redemption
pub const REFERRAL_LEVELS: u32 = 3;
/// Level 1, 2, 3 referral rates: 1.5%, 1.0%, 0.5%
pub const REFERRAL_RATES_BPS: [i128; 3] = [150, 100, 50];

/// Reference window the nominal reward rates are quoted over
pub const ACCRUAL_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;
/// Flat principal deduction for redeeming before unlock (40%)
pub const EARLY_PENALTY_BPS: i128 = 4_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instrument {
    /// Sequential instrument id
    pub item_id: u32,
    /// Collateral class id in the collateral contract
    pub collateral_id: u32,
    pub total_units: i128,
    pub price_per_unit: i128,
    /// Purchaser reward per accrual window, in basis points
    pub reward_rate_bps: u32,
    /// Lock period in seconds
    pub validity: u64,
    pub units_sold: i128,
    pub units_burnt: i128,
}

impl Instrument {
    pub fn available_units(&self) -> i128 {
        self.total_units - self.units_sold - self.units_burnt
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Purchase {
    pub purchase_id: u64,
    pub item_id: u32,
    pub units: i128,
    /// units × price_per_unit
    pub principal: i128,
    /// purchase time + validity
    pub unlock_time: u64,
    pub buyer: Address,
    /// Accrual this position added to `Accounting::total_expected_reward`
    pub expected_reward: i128,
}

/// A referral payment owed to one ancestor
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralPayout {
    pub beneficiary: Address,
    /// 1-based distance from the buyer
    pub level: u32,
    pub amount: i128,
}

/// Ledger-wide liabilities
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accounting {
    /// Sum of open positions' principal
    pub total_outstanding_principal: i128,
    /// Sum of open positions' full-validity accrual (purchaser + referrers)
    pub total_expected_reward: i128,
    /// Early-redemption penalties held for the owner
    pub collected_penalty: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    CollateralToken,
    PaymentToken,
    ItemCounter,
    PurchaseCounter,
    Accounting,
    Instrument(u32),   // item_id → Instrument
    Purchase(u64),     // purchase_id → Purchase
    Referrer(Address), // participant → referrer
}

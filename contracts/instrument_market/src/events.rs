use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerAddedEvent {
    pub participant: Address,
    pub referrer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstrumentCreatedEvent {
    pub item_id: u32,
    pub collateral_id: u32,
    pub total_units: i128,
    pub price_per_unit: i128,
    pub reward_rate_bps: u32,
    pub validity: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstrumentSoldEvent {
    pub purchase_id: u64,
    pub item_id: u32,
    pub collateral_id: u32,
    pub units: i128,
    pub principal: i128,
    pub reward_rate_bps: u32,
    pub validity: u64,
    pub unlock_time: u64,
    pub buyer: Address,
}

/// One per referral payment, at purchase (bonus) and at redemption (accrual)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardReleasedEvent {
    pub purchase_id: u64,
    pub beneficiary: Address,
    pub level: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapitalWithdrawnEvent {
    pub purchase_id: u64,
    pub buyer: Address,
    pub principal: i128,
    pub reward: i128,
    pub penalty: i128,
    pub payout: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyDeductedEvent {
    pub purchase_id: u64,
    pub item_id: u32,
    pub buyer: Address,
    pub penalty: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

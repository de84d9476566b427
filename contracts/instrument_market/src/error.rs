use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller is not the buyer recorded on the purchase
    Unauthorized = 10,

    // ============================================
    // VALIDATION ERRORS (20-29)
    // ============================================
    /// Units, price or validity is zero (or units negative)
    InvalidQuantity = 20,
    /// Reward rate outside 1..=10_000 basis points
    InvalidRate = 21,
    /// Referrer would appear in its own referral chain
    InvalidReferrer = 22,
    /// No instrument with this id
    InstrumentNotFound = 23,
    /// No open purchase with this id
    PurchaseNotFound = 24,

    // ============================================
    // STATE CONFLICT ERRORS (30-39)
    // ============================================
    /// Participant already has a referrer
    ReferrerAlreadyBound = 30,

    // ============================================
    // SOLVENCY ERRORS (40-59)
    // ============================================
    /// Owner does not hold enough collateral units to list
    InsufficientCollateralBalance = 40,
    /// Requested units exceed what is left for sale
    InsufficientInstrumentSupply = 41,
    /// Buyer cannot fund the principal
    InsufficientPayerBalance = 42,
    /// Reward pool cannot cover referral payouts
    InsufficientRewardPool = 43,
    /// Reward pool cannot cover principal plus purchaser reward
    InsufficientCapitalPool = 44,
    /// Buyer no longer holds the purchased units
    InsufficientUnitsToReturn = 45,
    /// Nothing left to sweep outside the penalty pot
    NoWithdrawableBalance = 46,
    /// Penalty pot is empty
    NoPenaltyBalance = 47,

    // ============================================
    // ARITHMETIC ERRORS (60-69)
    // ============================================
    /// Amount computation overflowed
    ArithmeticOverflow = 60,
}

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    NotNominee = 10,
    MarketplaceNotSet = 11,

    // Ownership/registration conflicts
    OwnerCannotBeNominee = 20,
    AlreadyNominee = 21,
    MarketplaceAlreadySet = 22,

    // Validation errors
    InvalidAmount = 30,
    InvalidUri = 31,
    UriAlreadyMinted = 32,

    // Balance errors
    InsufficientBalance = 40,

    // Arithmetic
    ArithmeticOverflow = 50,
}

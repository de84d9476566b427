#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{
    BurnEvent, MarketplaceSetEvent, MintEvent, NomineeAddedEvent, OwnerChangedEvent,
    TransferEvent,
};
use storage::{read_balance, read_counter, write_balance, DataKey};

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

/// Multi-unit collateral token. Every `id` is a separate fungible class of
/// units minted in one batch by the owner and burnt only by the registered
/// marketplace.
#[contract]
pub struct CollateralUnits;

#[contractimpl]
impl CollateralUnits {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, owner: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::IdCounter, &0u32);

        Ok(())
    }

    // ============================================
    // OWNERSHIP HANDOVER (NOMINATE, THEN ACCEPT)
    // ============================================

    /// Nominate the next owner. Ownership moves only once the nominee accepts.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `OwnerCannotBeNominee`: Nominee is the current owner
    /// - `AlreadyNominee`: Nominee is already pending
    pub fn nominate_owner(env: Env, nominee: Address) -> Result<(), Error> {
        let owner = Self::require_owner(&env)?;

        if nominee == owner {
            return Err(Error::OwnerCannotBeNominee);
        }

        let pending: Option<Address> = env.storage().instance().get(&DataKey::Nominee);
        if pending.as_ref() == Some(&nominee) {
            return Err(Error::AlreadyNominee);
        }

        env.storage().instance().set(&DataKey::Nominee, &nominee);

        env.events().publish(
            (Symbol::new(&env, "nominee_added"),),
            NomineeAddedEvent { owner, nominee },
        );

        Ok(())
    }

    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotNominee`: No pending nomination for this address
    pub fn accept_nomination(env: Env, nominee: Address) -> Result<(), Error> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&DataKey::Nominee)
            .ok_or(Error::NotNominee)?;
        if pending != nominee {
            return Err(Error::NotNominee);
        }

        nominee.require_auth();

        env.storage().instance().set(&DataKey::Owner, &nominee);
        env.storage().instance().remove(&DataKey::Nominee);

        env.events().publish(
            (Symbol::new(&env, "owner_changed"),),
            OwnerChangedEvent {
                previous_owner: owner,
                new_owner: nominee,
            },
        );

        Ok(())
    }

    /// Register the marketplace allowed to burn returned units.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `MarketplaceAlreadySet`: This marketplace is already registered
    pub fn set_marketplace(env: Env, marketplace: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let current: Option<Address> = env.storage().instance().get(&DataKey::Marketplace);
        if current.as_ref() == Some(&marketplace) {
            return Err(Error::MarketplaceAlreadySet);
        }

        env.storage()
            .instance()
            .set(&DataKey::Marketplace, &marketplace);

        env.events().publish(
            (Symbol::new(&env, "marketplace_set"),),
            MarketplaceSetEvent { marketplace },
        );

        Ok(())
    }

    // ============================================
    // SUPPLY
    // ============================================

    /// Mint a new class of units to the owner and return its id.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `MarketplaceNotSet`: No marketplace registered yet
    /// - `InvalidAmount`: Amount <= 0
    /// - `InvalidUri`: Empty metadata uri
    /// - `UriAlreadyMinted`: Uri already names a class
    pub fn mint(env: Env, amount: i128, uri: String) -> Result<u32, Error> {
        let owner = Self::require_owner(&env)?;

        if !env.storage().instance().has(&DataKey::Marketplace) {
            return Err(Error::MarketplaceNotSet);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        if uri.len() == 0 {
            return Err(Error::InvalidUri);
        }

        if env
            .storage()
            .persistent()
            .has(&DataKey::UriId(uri.clone()))
        {
            return Err(Error::UriAlreadyMinted);
        }

        let id: u32 = env
            .storage()
            .instance()
            .get::<_, u32>(&DataKey::IdCounter)
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;

        write_balance(&env, id, &owner, amount);
        env.storage().persistent().set(&DataKey::Supply(id), &amount);
        env.storage().persistent().set(&DataKey::Uri(id), &uri);
        env.storage()
            .persistent()
            .set(&DataKey::UriId(uri.clone()), &id);
        env.storage().instance().set(&DataKey::IdCounter, &id);

        env.events().publish(
            (Symbol::new(&env, "mint"), id),
            MintEvent {
                id,
                to: owner,
                amount,
                uri,
            },
        );

        Ok(id)
    }

    /// Burn units held by the marketplace (marketplace only)
    ///
    /// # Errors
    /// - `MarketplaceNotSet`: No marketplace registered
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Marketplace holds fewer units
    pub fn burn(env: Env, id: u32, amount: i128) -> Result<(), Error> {
        let marketplace: Address = env
            .storage()
            .instance()
            .get(&DataKey::Marketplace)
            .ok_or(Error::MarketplaceNotSet)?;
        marketplace.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = read_balance(&env, id, &marketplace);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let supply = read_counter(&env, &DataKey::Supply(id));
        let burnt = read_counter(&env, &DataKey::Burnt(id))
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        write_balance(&env, id, &marketplace, balance - amount);
        env.storage()
            .persistent()
            .set(&DataKey::Supply(id), &(supply - amount));
        env.storage().persistent().set(&DataKey::Burnt(id), &burnt);

        env.events().publish(
            (Symbol::new(&env, "burn"), id),
            BurnEvent {
                id,
                from: marketplace,
                amount,
            },
        );

        Ok(())
    }

    /// Transfer units between holders
    ///
    /// # Errors
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(
        env: Env,
        id: u32,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = read_balance(&env, id, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        // Self-transfer must not mint.
        if from != to {
            let to_balance = read_balance(&env, id, &to)
                .checked_add(amount)
                .ok_or(Error::InvalidAmount)?;
            write_balance(&env, id, &from, from_balance - amount);
            write_balance(&env, id, &to, to_balance);
        }

        env.events().publish(
            (Symbol::new(&env, "transfer"), id),
            TransferEvent {
                id,
                from,
                to,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn balance_of(env: Env, id: u32, holder: Address) -> i128 {
        read_balance(&env, id, &holder)
    }

    pub fn total_supply(env: Env, id: u32) -> i128 {
        read_counter(&env, &DataKey::Supply(id))
    }

    pub fn total_burnt(env: Env, id: u32) -> i128 {
        read_counter(&env, &DataKey::Burnt(id))
    }

    pub fn uri(env: Env, id: u32) -> Option<String> {
        env.storage().persistent().get(&DataKey::Uri(id))
    }

    /// Id minted for `uri`, or 0 when none
    pub fn token_id(env: Env, uri: String) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::UriId(uri))
            .unwrap_or(0)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn nominee(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Nominee)
    }

    pub fn marketplace(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Marketplace)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_owner(env: &Env) -> Result<Address, Error> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        owner.require_auth();
        Ok(owner)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env, String};

    const URI: &str = "https://arweave.net/eR4wgSnWusIG-xF2BZzsiOwVehQsvfCT8VAUC4NHQ5Y";

    fn setup<'a>() -> (Env, CollateralUnitsClient<'a>, Address, Address) {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(CollateralUnits, ());
        let client = CollateralUnitsClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        let marketplace = Address::generate(&env);
        client.initialize(&owner);

        (env, client, owner, marketplace)
    }

    #[test]
    fn test_initialize() {
        let (_env, client, owner, _) = setup();

        assert_eq!(client.owner(), owner);
        let result = client.try_initialize(&owner);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_nominate_and_accept() {
        let (env, client, owner, _) = setup();
        let nominee = Address::generate(&env);

        assert_eq!(
            client.try_nominate_owner(&owner),
            Err(Ok(Error::OwnerCannotBeNominee))
        );

        client.nominate_owner(&nominee);
        assert_eq!(client.nominee(), Some(nominee.clone()));
        assert_eq!(
            client.try_nominate_owner(&nominee),
            Err(Ok(Error::AlreadyNominee))
        );

        let stranger = Address::generate(&env);
        assert_eq!(
            client.try_accept_nomination(&stranger),
            Err(Ok(Error::NotNominee))
        );

        client.accept_nomination(&nominee);
        assert_eq!(client.owner(), nominee);
        assert_eq!(client.nominee(), None);
    }

    #[test]
    fn test_accept_without_nomination() {
        let (env, client, _, _) = setup();
        let someone = Address::generate(&env);

        assert_eq!(
            client.try_accept_nomination(&someone),
            Err(Ok(Error::NotNominee))
        );
    }

    #[test]
    fn test_set_marketplace_twice() {
        let (_env, client, _, marketplace) = setup();

        client.set_marketplace(&marketplace);
        assert_eq!(client.marketplace(), Some(marketplace.clone()));
        assert_eq!(
            client.try_set_marketplace(&marketplace),
            Err(Ok(Error::MarketplaceAlreadySet))
        );
    }

    #[test]
    fn test_mint_requires_marketplace() {
        let (env, client, _, _) = setup();

        let result = client.try_mint(&10, &String::from_str(&env, URI));
        assert_eq!(result, Err(Ok(Error::MarketplaceNotSet)));
    }

    #[test]
    fn test_mint_validation() {
        let (env, client, _, marketplace) = setup();
        client.set_marketplace(&marketplace);

        assert_eq!(
            client.try_mint(&0, &String::from_str(&env, URI)),
            Err(Ok(Error::InvalidAmount))
        );
        assert_eq!(
            client.try_mint(&10, &String::from_str(&env, "")),
            Err(Ok(Error::InvalidUri))
        );

        client.mint(&10, &String::from_str(&env, URI));
        assert_eq!(
            client.try_mint(&5, &String::from_str(&env, URI)),
            Err(Ok(Error::UriAlreadyMinted))
        );
    }

    #[test]
    fn test_mint_credits_owner() {
        let (env, client, owner, marketplace) = setup();
        client.set_marketplace(&marketplace);

        let uri = String::from_str(&env, URI);
        let id = client.mint(&10, &uri);

        assert_eq!(id, 1);
        assert_eq!(client.token_id(&uri), 1);
        assert_eq!(client.uri(&id), Some(uri));
        assert_eq!(client.total_supply(&id), 10);
        assert_eq!(client.balance_of(&id, &owner), 10);

        let second = client.mint(&3, &String::from_str(&env, "ipfs://second"));
        assert_eq!(second, 2);
    }

    #[test]
    fn test_transfer() {
        let (env, client, owner, marketplace) = setup();
        client.set_marketplace(&marketplace);
        let user = Address::generate(&env);

        let id = client.mint(&10, &String::from_str(&env, URI));
        client.transfer(&id, &owner, &user, &4);

        assert_eq!(client.balance_of(&id, &owner), 6);
        assert_eq!(client.balance_of(&id, &user), 4);

        assert_eq!(
            client.try_transfer(&id, &user, &owner, &5),
            Err(Ok(Error::InsufficientBalance))
        );
        assert_eq!(
            client.try_transfer(&id, &user, &owner, &0),
            Err(Ok(Error::InvalidAmount))
        );
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let (env, client, owner, marketplace) = setup();
        client.set_marketplace(&marketplace);

        let id = client.mint(&10, &String::from_str(&env, URI));
        client.transfer(&id, &owner, &owner, &10);

        assert_eq!(client.balance_of(&id, &owner), 10);
    }

    #[test]
    fn test_burn_by_marketplace() {
        let (env, client, owner, marketplace) = setup();
        client.set_marketplace(&marketplace);

        let id = client.mint(&10, &String::from_str(&env, URI));
        client.transfer(&id, &owner, &marketplace, &10);

        assert_eq!(
            client.try_burn(&id, &11),
            Err(Ok(Error::InsufficientBalance))
        );
        assert_eq!(client.try_burn(&id, &0), Err(Ok(Error::InvalidAmount)));

        client.burn(&id, &6);

        let auths = env.auths();
        assert_eq!(auths.len(), 1);
        assert_eq!(auths[0].0, marketplace);

        assert_eq!(client.total_supply(&id), 4);
        assert_eq!(client.total_burnt(&id), 6);
        assert_eq!(client.balance_of(&id, &marketplace), 4);
    }

    #[test]
    fn test_mint_id_counter_does_not_wrap() {
        let (env, client, _owner, marketplace) = setup();
        client.set_marketplace(&marketplace);

        env.as_contract(&client.address, || {
            env.storage().instance().set(&DataKey::IdCounter, &u32::MAX);
        });

        assert_eq!(
            client.try_mint(&10, &String::from_str(&env, URI)),
            Err(Ok(Error::ArithmeticOverflow))
        );
        assert_eq!(client.token_id(&String::from_str(&env, URI)), 0);
    }

    #[test]
    fn test_burn_without_marketplace() {
        let (_env, client, _, _) = setup();

        assert_eq!(client.try_burn(&1, &1), Err(Ok(Error::MarketplaceNotSet)));
    }
}

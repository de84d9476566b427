use crate::collateral::Collateral;
use crate::error::Error;
use crate::events::InstrumentCreatedEvent;
use crate::storage::Storage;
use crate::types::{Instrument, MAX_REWARD_RATE_BPS};
use soroban_sdk::{Env, Symbol};

pub struct Catalog;

impl Catalog {
    /// List `total_units` of a collateral class for sale (owner only). The
    /// units move into marketplace custody.
    pub fn create_instrument(
        env: &Env,
        collateral_id: u32,
        total_units: i128,
        price_per_unit: i128,
        reward_rate_bps: u32,
        validity: u64,
    ) -> Result<u32, Error> {
        let owner = Storage::get_owner(env)?;
        owner.require_auth();

        if total_units <= 0 || price_per_unit <= 0 || validity == 0 {
            return Err(Error::InvalidQuantity);
        }

        if reward_rate_bps == 0 || reward_rate_bps > MAX_REWARD_RATE_BPS {
            return Err(Error::InvalidRate);
        }

        let collateral = Collateral::new(env, Storage::get_collateral_token(env)?);
        if collateral.balance_of(collateral_id, &owner) < total_units {
            return Err(Error::InsufficientCollateralBalance);
        }

        collateral.transfer(
            collateral_id,
            &owner,
            &env.current_contract_address(),
            total_units,
        );

        let item_id = Storage::next_item_id(env)?;
        let instrument = Instrument {
            item_id,
            collateral_id,
            total_units,
            price_per_unit,
            reward_rate_bps,
            validity,
            units_sold: 0,
            units_burnt: 0,
        };
        Storage::set_instrument(env, &instrument);

        env.events().publish(
            (Symbol::new(env, "instrument_created"), item_id),
            InstrumentCreatedEvent {
                item_id,
                collateral_id,
                total_units,
                price_per_unit,
                reward_rate_bps,
                validity,
            },
        );

        Ok(item_id)
    }
}

use crate::collateral::Collateral;
use crate::error::Error;
use crate::events::{InstrumentSoldEvent, RewardReleasedEvent};
use crate::referral::Referrals;
use crate::rewards::{calculate_accrual, calculate_rate_amount};
use crate::storage::Storage;
use crate::treasury::Treasury;
use crate::types::Purchase;
use soroban_sdk::{token, Address, Env, Symbol};

pub struct PurchaseOps;

impl PurchaseOps {
    /// Buy `units` of an instrument. Returns the new purchase id.
    ///
    /// Order: supply and payer checks, then the reward-pool check for the
    /// referral bonuses, then every transfer and state write.
    pub fn purchase(env: &Env, buyer: &Address, item_id: u32, units: i128) -> Result<u64, Error> {
        buyer.require_auth();

        if units <= 0 {
            return Err(Error::InvalidQuantity);
        }

        let mut instrument = Storage::get_instrument(env, item_id)?;
        if units > instrument.available_units() {
            return Err(Error::InsufficientInstrumentSupply);
        }

        let principal = units
            .checked_mul(instrument.price_per_unit)
            .ok_or(Error::ArithmeticOverflow)?;

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        if payment.balance(buyer) < principal {
            return Err(Error::InsufficientPayerBalance);
        }

        let bonuses = Referrals::bonuses(env, buyer, principal)?;
        let bonus_total = Referrals::total(&bonuses)?;
        let pool = Treasury::reward_pool(env, &payment);
        Treasury::ensure_covers(env, pool, bonus_total, Error::InsufficientRewardPool)?;

        // Full-validity accrual this position can claim at redemption.
        let purchaser_reward = calculate_rate_amount(principal, instrument.reward_rate_bps as i128)
            .and_then(|amount| calculate_accrual(amount, instrument.validity, instrument.validity))
            .ok_or(Error::ArithmeticOverflow)?;
        let referrer_allowance = Referrals::total(&Referrals::accruals(
            env,
            buyer,
            principal,
            instrument.validity,
            instrument.validity,
        )?)?;
        let expected_reward = purchaser_reward
            .checked_add(referrer_allowance)
            .ok_or(Error::ArithmeticOverflow)?;

        let mut accounting = Storage::get_accounting(env);
        accounting.total_outstanding_principal = accounting
            .total_outstanding_principal
            .checked_add(principal)
            .ok_or(Error::ArithmeticOverflow)?;
        accounting.total_expected_reward = accounting
            .total_expected_reward
            .checked_add(expected_reward)
            .ok_or(Error::ArithmeticOverflow)?;

        let unlock_time = env
            .ledger()
            .timestamp()
            .checked_add(instrument.validity)
            .ok_or(Error::ArithmeticOverflow)?;

        // Sale proceeds go straight to the owner, not into the pool.
        let owner = Storage::get_owner(env)?;
        payment.transfer(buyer, &owner, &principal);

        let collateral = Collateral::new(env, Storage::get_collateral_token(env)?);
        collateral.transfer(
            instrument.collateral_id,
            &env.current_contract_address(),
            buyer,
            units,
        );

        let purchase_id = Storage::next_purchase_id(env)?;

        for bonus in bonuses.iter() {
            payment.transfer(
                &env.current_contract_address(),
                &bonus.beneficiary,
                &bonus.amount,
            );
            env.events().publish(
                (Symbol::new(env, "reward_released"), purchase_id),
                RewardReleasedEvent {
                    purchase_id,
                    beneficiary: bonus.beneficiary,
                    level: bonus.level,
                    amount: bonus.amount,
                },
            );
        }

        instrument.units_sold += units;
        Storage::set_instrument(env, &instrument);

        Storage::set_purchase(
            env,
            &Purchase {
                purchase_id,
                item_id,
                units,
                principal,
                unlock_time,
                buyer: buyer.clone(),
                expected_reward,
            },
        );
        Storage::set_accounting(env, &accounting);

        env.events().publish(
            (Symbol::new(env, "instrument_sold"), item_id),
            InstrumentSoldEvent {
                purchase_id,
                item_id,
                collateral_id: instrument.collateral_id,
                units,
                principal,
                reward_rate_bps: instrument.reward_rate_bps,
                validity: instrument.validity,
                unlock_time,
                buyer: buyer.clone(),
            },
        );

        Ok(purchase_id)
    }
}

use crate::collateral::Collateral;
use crate::error::Error;
use crate::events::{CapitalWithdrawnEvent, PenaltyDeductedEvent, RewardReleasedEvent};
use crate::referral::Referrals;
use crate::rewards::{calculate_accrual, calculate_penalty, calculate_rate_amount};
use crate::storage::Storage;
use crate::treasury::Treasury;
use soroban_sdk::{log, token, Address, Env, Symbol};

/// Amounts settled by one redemption
pub struct Settlement {
    pub reward: i128,
    pub penalty: i128,
    pub payout: i128,
}

pub struct RedemptionOps;

impl RedemptionOps {
    /// Close a purchase: pay referrer accruals, then principal plus the
    /// purchaser's accrual (less the early penalty), and burn the units.
    ///
    /// Both solvency legs are checked against the pool before any transfer.
    /// Referrer accruals have first claim; the capital leg only has to cover
    /// the net payout.
    pub fn redeem(env: &Env, caller: &Address, purchase_id: u64) -> Result<i128, Error> {
        caller.require_auth();

        let purchase = Storage::get_purchase(env, purchase_id)?;
        if *caller != purchase.buyer {
            return Err(Error::Unauthorized);
        }

        let mut instrument = Storage::get_instrument(env, purchase.item_id)?;

        let collateral = Collateral::new(env, Storage::get_collateral_token(env)?);
        if collateral.balance_of(instrument.collateral_id, caller) < purchase.units {
            return Err(Error::InsufficientUnitsToReturn);
        }

        let now = env.ledger().timestamp();
        let purchased_at = purchase.unlock_time.saturating_sub(instrument.validity);
        let elapsed = now.saturating_sub(purchased_at);

        let referrer_accruals = Referrals::accruals(
            env,
            caller,
            purchase.principal,
            elapsed,
            instrument.validity,
        )?;
        let referrer_total = Referrals::total(&referrer_accruals)?;

        let settlement = Self::settle(
            purchase.principal,
            instrument.reward_rate_bps,
            elapsed,
            instrument.validity,
            now < purchase.unlock_time,
        )?;

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        let pool = Treasury::reward_pool(env, &payment);
        Treasury::ensure_covers(env, pool, referrer_total, Error::InsufficientRewardPool)?;

        Treasury::ensure_covers(
            env,
            pool - referrer_total,
            settlement.payout,
            Error::InsufficientCapitalPool,
        )?;

        let mut accounting = Storage::get_accounting(env);
        accounting.total_outstanding_principal = accounting
            .total_outstanding_principal
            .checked_sub(purchase.principal)
            .ok_or(Error::ArithmeticOverflow)?;
        accounting.total_expected_reward = accounting
            .total_expected_reward
            .checked_sub(purchase.expected_reward)
            .ok_or(Error::ArithmeticOverflow)?;
        accounting.collected_penalty = accounting
            .collected_penalty
            .checked_add(settlement.penalty)
            .ok_or(Error::ArithmeticOverflow)?;

        let market = env.current_contract_address();

        for accrual in referrer_accruals.iter() {
            payment.transfer(&market, &accrual.beneficiary, &accrual.amount);
            env.events().publish(
                (Symbol::new(env, "reward_released"), purchase_id),
                RewardReleasedEvent {
                    purchase_id,
                    beneficiary: accrual.beneficiary,
                    level: accrual.level,
                    amount: accrual.amount,
                },
            );
        }

        if settlement.payout > 0 {
            payment.transfer(&market, caller, &settlement.payout);
        }

        collateral.transfer(instrument.collateral_id, caller, &market, purchase.units);
        collateral.burn(instrument.collateral_id, purchase.units);

        instrument.units_sold -= purchase.units;
        instrument.units_burnt += purchase.units;
        Storage::set_instrument(env, &instrument);

        Storage::remove_purchase(env, purchase_id);
        Storage::set_accounting(env, &accounting);

        if settlement.penalty > 0 {
            log!(env, "early redemption of purchase {}", purchase_id);
            env.events().publish(
                (Symbol::new(env, "penalty_deducted"), purchase_id),
                PenaltyDeductedEvent {
                    purchase_id,
                    item_id: purchase.item_id,
                    buyer: caller.clone(),
                    penalty: settlement.penalty,
                },
            );
        }

        env.events().publish(
            (Symbol::new(env, "capital_withdrawn"), purchase_id),
            CapitalWithdrawnEvent {
                purchase_id,
                buyer: caller.clone(),
                principal: purchase.principal,
                reward: settlement.reward,
                penalty: settlement.penalty,
                payout: settlement.payout,
            },
        );

        Ok(settlement.payout)
    }

    /// Purchaser side of a redemption
    ///
    /// Formula: payout = principal + accrual − (early ? principal × 40% : 0)
    pub fn settle(
        principal: i128,
        reward_rate_bps: u32,
        elapsed: u64,
        validity: u64,
        early: bool,
    ) -> Result<Settlement, Error> {
        let reward = calculate_rate_amount(principal, reward_rate_bps as i128)
            .and_then(|amount| calculate_accrual(amount, elapsed, validity))
            .ok_or(Error::ArithmeticOverflow)?;

        let penalty = if early {
            calculate_penalty(principal).ok_or(Error::ArithmeticOverflow)?
        } else {
            0
        };

        let payout = principal
            .checked_add(reward)
            .and_then(|gross| gross.checked_sub(penalty))
            .ok_or(Error::ArithmeticOverflow)?;

        Ok(Settlement {
            reward,
            penalty,
            payout,
        })
    }
}

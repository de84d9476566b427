use crate::error::Error;
use crate::events::ReferrerAddedEvent;
use crate::rewards::{calculate_accrual, calculate_rate_amount};
use crate::storage::Storage;
use crate::types::{ReferralPayout, REFERRAL_LEVELS, REFERRAL_RATES_BPS};
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct Referrals;

impl Referrals {
    /// Bind `participant` to `referrer`. Edges are write-once.
    pub fn register(env: &Env, participant: &Address, referrer: &Address) -> Result<(), Error> {
        participant.require_auth();

        if Storage::get_referrer(env, participant).is_some() {
            return Err(Error::ReferrerAlreadyBound);
        }

        // A participant may not show up among its own paid ancestors.
        if referrer == participant || Self::chain(env, referrer).contains(participant) {
            return Err(Error::InvalidReferrer);
        }

        Storage::set_referrer(env, participant, referrer);

        env.events().publish(
            (Symbol::new(env, "referrer_added"), participant.clone()),
            ReferrerAddedEvent {
                participant: participant.clone(),
                referrer: referrer.clone(),
            },
        );

        Ok(())
    }

    /// Up to three ancestors of `participant`, nearest first
    pub fn chain(env: &Env, participant: &Address) -> Vec<Address> {
        let mut chain = Vec::new(env);
        let mut current = participant.clone();

        while chain.len() < REFERRAL_LEVELS {
            match Storage::get_referrer(env, &current) {
                Some(referrer) => {
                    chain.push_back(referrer.clone());
                    current = referrer;
                }
                None => break,
            }
        }

        chain
    }

    /// One-time origination bonuses for each present ancestor
    pub fn bonuses(
        env: &Env,
        buyer: &Address,
        principal: i128,
    ) -> Result<Vec<ReferralPayout>, Error> {
        Self::payouts(env, buyer, |rate_bps| {
            calculate_rate_amount(principal, rate_bps)
        })
    }

    /// Time-prorated accruals for each present ancestor
    pub fn accruals(
        env: &Env,
        buyer: &Address,
        principal: i128,
        elapsed: u64,
        validity: u64,
    ) -> Result<Vec<ReferralPayout>, Error> {
        Self::payouts(env, buyer, |rate_bps| {
            calculate_accrual(calculate_rate_amount(principal, rate_bps)?, elapsed, validity)
        })
    }

    pub fn total(payouts: &Vec<ReferralPayout>) -> Result<i128, Error> {
        payouts.iter().try_fold(0i128, |sum, payout| {
            sum.checked_add(payout.amount)
                .ok_or(Error::ArithmeticOverflow)
        })
    }

    fn payouts<F>(env: &Env, buyer: &Address, amount_for: F) -> Result<Vec<ReferralPayout>, Error>
    where
        F: Fn(i128) -> Option<i128>,
    {
        let mut payouts = Vec::new(env);

        for (beneficiary, (rate_bps, level)) in Self::chain(env, buyer)
            .iter()
            .zip(REFERRAL_RATES_BPS.iter().zip(1u32..))
        {
            let amount = amount_for(*rate_bps).ok_or(Error::ArithmeticOverflow)?;
            if amount == 0 {
                continue;
            }
            payouts.push_back(ReferralPayout {
                beneficiary,
                level,
                amount,
            });
        }

        Ok(payouts)
    }
}

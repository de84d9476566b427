use crate::error::Error;
use crate::events::{BalanceWithdrawnEvent, PenaltyWithdrawnEvent};
use crate::storage::Storage;
use soroban_sdk::{log, token, Env, Symbol};

pub struct Treasury;

impl Treasury {
    /// Payment balance available for payouts: everything the marketplace
    /// holds minus the penalty pot, which belongs to the owner.
    pub fn reward_pool(env: &Env, payment: &token::Client) -> i128 {
        let balance = payment.balance(&env.current_contract_address());
        let accounting = Storage::get_accounting(env);

        balance.saturating_sub(accounting.collected_penalty).max(0)
    }

    /// Fail unless the pool covers `needed`
    pub fn ensure_covers(env: &Env, pool: i128, needed: i128, err: Error) -> Result<(), Error> {
        if pool < needed {
            log!(env, "reward pool short: {} < {}", pool, needed);
            return Err(err);
        }
        Ok(())
    }

    /// Sweep the reward pool to the owner. The penalty pot stays behind.
    pub fn withdraw_balance(env: &Env) -> Result<i128, Error> {
        let owner = Storage::get_owner(env)?;
        owner.require_auth();

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        let amount = Self::reward_pool(env, &payment);
        if amount == 0 {
            return Err(Error::NoWithdrawableBalance);
        }

        payment.transfer(&env.current_contract_address(), &owner, &amount);

        env.events().publish(
            (Symbol::new(env, "balance_withdrawn"),),
            BalanceWithdrawnEvent { owner, amount },
        );

        Ok(amount)
    }

    /// Pay the penalty pot to the owner. A pot the balance no longer fully
    /// backs is paid up to the balance and the rest stays claimable.
    pub fn withdraw_penalty(env: &Env) -> Result<i128, Error> {
        let owner = Storage::get_owner(env)?;
        owner.require_auth();

        let mut accounting = Storage::get_accounting(env);
        if accounting.collected_penalty == 0 {
            return Err(Error::NoPenaltyBalance);
        }

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        let balance = payment.balance(&env.current_contract_address());
        let amount = accounting.collected_penalty.min(balance);
        if amount <= 0 {
            log!(env, "penalty pot unbacked: {}", accounting.collected_penalty);
            return Err(Error::NoPenaltyBalance);
        }

        payment.transfer(&env.current_contract_address(), &owner, &amount);

        accounting.collected_penalty -= amount;
        Storage::set_accounting(env, &accounting);

        env.events().publish(
            (Symbol::new(env, "penalty_withdrawn"),),
            PenaltyWithdrawnEvent { owner, amount },
        );

        Ok(amount)
    }
}

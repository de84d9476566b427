use soroban_sdk::{vec, Address, Env, IntoVal, Symbol};

/// Calls into the collateral-units contract. Failures inside the callee abort
/// the whole invocation, so callers validate before transferring.
pub struct Collateral<'a> {
    env: &'a Env,
    contract: Address,
}

impl<'a> Collateral<'a> {
    pub fn new(env: &'a Env, contract: Address) -> Self {
        Self { env, contract }
    }

    pub fn balance_of(&self, id: u32, holder: &Address) -> i128 {
        self.env.invoke_contract(
            &self.contract,
            &Symbol::new(self.env, "balance_of"),
            vec![self.env, id.into_val(self.env), holder.to_val()],
        )
    }

    pub fn transfer(&self, id: u32, from: &Address, to: &Address, amount: i128) {
        self.env.invoke_contract::<()>(
            &self.contract,
            &Symbol::new(self.env, "transfer"),
            vec![
                self.env,
                id.into_val(self.env),
                from.to_val(),
                to.to_val(),
                amount.into_val(self.env),
            ],
        );
    }

    /// Burn units held by this marketplace
    pub fn burn(&self, id: u32, amount: i128) {
        self.env.invoke_contract::<()>(
            &self.contract,
            &Symbol::new(self.env, "burn"),
            vec![self.env, id.into_val(self.env), amount.into_val(self.env)],
        );
    }
}

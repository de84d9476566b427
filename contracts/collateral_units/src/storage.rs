use soroban_sdk::{contracttype, Address, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    Nominee,
    Marketplace,
    IdCounter,
    Balance(u32, Address), // (id, holder)
    Supply(u32),
    Burnt(u32),
    Uri(u32),
    UriId(String),
}

pub fn read_balance(env: &Env, id: u32, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id, holder.clone()))
        .unwrap_or(0)
}

pub fn write_balance(env: &Env, id: u32, holder: &Address, amount: i128) {
    let key = DataKey::Balance(id, holder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
    }
}

pub fn read_counter(env: &Env, key: &DataKey) -> i128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

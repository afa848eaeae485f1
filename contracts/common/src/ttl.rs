use soroban_sdk::{Env, IntoVal, Val};

// Roughly 30 / 60 days of ledgers at a 5s close time.
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518_400;
pub const PERSISTENT_TTL_EXTEND_TO: u32 = 1_036_800;

pub const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
pub const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

/// Keep a persistent entry alive. The entry must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

/// Smallest-denomination units per whole settlement token.
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Tokens a participant must bond to be admitted.
pub const DEFAULT_STAKE_TOKENS: u64 = 10;

/// Gas limit for stake and unstake transactions.
pub const DEFAULT_STAKE_GAS_LIMIT: u64 = 1_000_000;

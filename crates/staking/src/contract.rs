//! Construction of stake and unstake transactions against the staking
//! contract. Signing stays with the caller's wallet.

use ethabi::{short_signature, ParamType, Token};

use avs_types::{Address, ParticipantKind, Transaction};

/// Predeployed staking contract.
pub const STAKING_CONTRACT: Address = Address::new([
    0x01, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01,
]);

/// `stake(string)` call carrying the bond as its value.
pub fn stake_tx(kind: ParticipantKind, amount: u128, gas_limit: u64) -> Transaction {
    let mut input = short_signature("stake", &[ParamType::String]).to_vec();
    input.extend(ethabi::encode(&[Token::String(kind.to_string())]));
    Transaction {
        nonce: 0,
        gas_price: 0,
        gas_limit,
        to: Some(STAKING_CONTRACT),
        value: amount,
        input,
    }
}

/// `unstake()` call releasing this node's bond.
pub fn unstake_tx(gas_limit: u64) -> Transaction {
    Transaction {
        nonce: 0,
        gas_price: 0,
        gas_limit,
        to: Some(STAKING_CONTRACT),
        value: 0,
        input: short_signature("unstake", &[]).to_vec(),
    }
}

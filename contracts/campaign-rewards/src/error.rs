use cosmwasm_std::{Addr, OverflowError, StdError, Uint128};
use cw_utils::{self, PaymentError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized, sender is {sender}")]
    Unauthorized { sender: Addr },

    #[error("Cannot remove the last remaining admin")]
    CannotRemoveLastAdmin {},

    #[error("Contract is paused")]
    Paused {},

    #[error("Contract is already paused")]
    AlreadyPaused {},

    #[error("Contract is not paused")]
    NotPaused {},

    #[error("Insufficient creation fee, required {required} but sent {sent}")]
    InsufficientFee { required: Uint128, sent: Uint128 },

    #[error("Token allowance does not cover the deposit")]
    InsufficientAllowance {},

    #[error("Token balance does not cover the deposit")]
    InsufficientFunds {},

    #[error("Campaign balance does not cover the claim amount")]
    InsufficientCampaignBalance {},

    #[error("Claim amount must be greater than zero")]
    ZeroClaimAmount {},

    #[error("Deposit must be an exact multiple of the claim amount")]
    UnevenDeposit {},

    #[error("Campaign admin public key must be a 33-byte compressed secp256k1 key")]
    InvalidPubkey {},

    #[error("Signature was not produced by the campaign admin")]
    InvalidSignature {},

    #[error("Nonce {nonce} has already been used")]
    NonceAlreadyUsed { nonce: String },

    #[error("Campaign {id} does not exist")]
    CampaignNotFound { id: u64 },

    #[error("Campaign is not active")]
    CampaignNotActive {},

    #[error("Campaign has been cancelled")]
    CampaignCancelled {},

    #[error("Campaign is already cancelled")]
    AlreadyCancelled {},

    #[error("No reward due for this campaign")]
    NothingDue {},

    #[error("No fees accrued to withdraw")]
    NothingToWithdraw {},

    #[error("Index out of range")]
    IndexOutOfRange {},

    #[error("Cannot migrate from contract {previous_contract}")]
    CannotMigrate { previous_contract: String },
}

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Initial contract admins; the sender becomes the sole admin when empty.
    pub admins: Vec<String>,
    /// Native denom the creation fee is charged in.
    pub fee_denom: String,
    /// Fee required to create a campaign.
    pub campaign_fee: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    AddAdmin {
        address: String,
    },
    RemoveAdmin {
        address: String,
    },
    Pause {},
    Unpause {},
    SetCampaignFee {
        fee: Uint128,
    },
    /// Send the whole accrued fee pool to the calling admin.
    WithdrawFees {},
    /// Escrow `deposit_amount` of `token` from the sender and open a new
    /// campaign paying `claim_amount` per authorized claim. The creation
    /// fee must be attached as native funds.
    CreateCampaign {
        token: String,
        deposit_amount: Uint128,
        claim_amount: Uint128,
        /// Compressed secp256k1 public key (33 bytes) that will sign
        /// claim authorizations for this campaign.
        admin_pubkey: Binary,
    },
    SuspendCampaign {
        id: u64,
    },
    ResumeCampaign {
        id: u64,
    },
    /// Terminal: moves the remaining escrow into the admin's withdrawable
    /// reward. Permitted even while the contract is paused.
    CancelCampaign {
        id: u64,
    },
    /// Redeem an off-chain authorization: a 64-byte compact secp256k1
    /// signature by the campaign admin over Sha256(nonce || sender).
    ClaimReward {
        id: u64,
        nonce: String,
        signature: Binary,
    },
    /// Pay out the sender's accrued reward for the campaign in the
    /// escrowed token. Permitted even while the contract is paused.
    WithdrawReward {
        id: u64,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(bool)]
    IsAdmin { address: String },
    #[returns(bool)]
    Paused {},
    #[returns(Uint128)]
    CampaignFee {},
    #[returns(Uint128)]
    FeePool {},
    #[returns(CampaignResponse)]
    Campaign { id: u64 },
    /// Accrued, not yet withdrawn reward; 0 when none.
    #[returns(Uint128)]
    Reward { id: u64, address: String },
    #[returns(bool)]
    IsCampaignAdmin { id: u64, address: String },
    #[returns(bool)]
    IsCampaignBeneficiary { id: u64, address: String },
    #[returns(u64)]
    CampaignBeneficiaryCount { id: u64 },
    #[returns(Addr)]
    CampaignBeneficiary { id: u64, index: u64 },
    #[returns(u64)]
    UserCampaignCount { address: String },
    #[returns(u64)]
    UserCampaignId { address: String, index: u64 },
    #[returns(u64)]
    UserClaimsCount { address: String },
    #[returns(u64)]
    UserClaim { address: String, index: u64 },
}

#[cw_serde]
pub struct CampaignResponse {
    pub id: u64,
    pub admin: Addr,
    pub token: Addr,
    pub balance: Uint128,
    pub claim_amount: Uint128,
    pub active: bool,
    pub cancelled: bool,
}

#[cw_serde]
pub struct MigrateMsg {}

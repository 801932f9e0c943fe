use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Denom of the native coin charged as the campaign creation fee.
    pub fee_denom: String,
    /// Fee required for each campaign creation; changes apply to
    /// subsequent creations only.
    pub campaign_fee: Uint128,
}

#[cw_serde]
pub struct AdminList {
    pub admins: Vec<Addr>,
}

impl AdminList {
    pub fn is_admin(&self, addr: impl AsRef<str>) -> bool {
        let addr = addr.as_ref();
        self.admins.iter().any(|a| a.as_ref() == addr)
    }
}

#[cw_serde]
pub struct Campaign {
    /// Creator of the campaign; sole authority over its lifecycle and the
    /// only valid signer of claim authorizations.
    pub admin: Addr,
    /// Compressed secp256k1 public key the admin signs claim digests with.
    pub admin_pubkey: Binary,
    /// cw20 token escrowed by this campaign.
    pub token: Addr,
    /// Remaining escrowed amount.
    pub balance: Uint128,
    /// Fixed reward per successful claim, immutable after creation.
    pub claim_amount: Uint128,
    pub active: bool,
    pub cancelled: bool,
    /// Insertion-ordered set of principals that have claimed.
    pub beneficiaries: Vec<Addr>,
}

impl Campaign {
    pub fn is_beneficiary(&self, addr: &Addr) -> bool {
        self.beneficiaries.contains(addr)
    }

    pub fn is_claimable(&self) -> bool {
        self.active && !self.cancelled
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const ADMIN_LIST: Item<AdminList> = Item::new("admin_list");

pub const PAUSED: Item<bool> = Item::new("paused");

/// Native fees accrued from campaign creations.
pub const FEE_POOL: Item<Uint128> = Item::new("fee_pool");

/// Last assigned campaign id; ids start at 1 and are never reused.
pub const CAMPAIGN_COUNT: Item<u64> = Item::new("campaign_count");

pub const CAMPAIGNS: Map<u64, Campaign> = Map::new("campaigns");

// admin -> campaign ids created, append-only
pub const ADMIN_CAMPAIGNS: Map<&Addr, Vec<u64>> = Map::new("admin_campaigns");

// (campaign id, principal) -> accrued, un-withdrawn reward
pub const REWARDS: Map<(u64, &Addr), Uint128> = Map::new("rewards");

// principal -> campaign ids with an un-withdrawn reward
pub const USER_CLAIMS: Map<&Addr, Vec<u64>> = Map::new("user_claims");

// (nonce, claimant) -> consumed, global across campaigns
pub const USED_NONCES: Map<(&str, &Addr), bool> = Map::new("used_nonces");

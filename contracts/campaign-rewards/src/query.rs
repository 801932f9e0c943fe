#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Addr, Binary, Deps, Env, StdResult, Uint128};

use crate::error::ContractError;
use crate::msg::{CampaignResponse, QueryMsg};
use crate::state::{
    Campaign, ADMIN_CAMPAIGNS, ADMIN_LIST, CAMPAIGNS, CONFIG, FEE_POOL, PAUSED, REWARDS,
    USER_CLAIMS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::IsAdmin { address } => Ok(to_binary(&query_is_admin(deps, address)?)?),
        QueryMsg::Paused {} => Ok(to_binary(&PAUSED.load(deps.storage)?)?),
        QueryMsg::CampaignFee {} => Ok(to_binary(&CONFIG.load(deps.storage)?.campaign_fee)?),
        QueryMsg::FeePool {} => Ok(to_binary(&FEE_POOL.load(deps.storage)?)?),
        QueryMsg::Campaign { id } => Ok(to_binary(&query_campaign(deps, id)?)?),
        QueryMsg::Reward { id, address } => Ok(to_binary(&query_reward(deps, id, address)?)?),
        QueryMsg::IsCampaignAdmin { id, address } => {
            Ok(to_binary(&query_is_campaign_admin(deps, id, address)?)?)
        }
        QueryMsg::IsCampaignBeneficiary { id, address } => Ok(to_binary(
            &query_is_campaign_beneficiary(deps, id, address)?,
        )?),
        QueryMsg::CampaignBeneficiaryCount { id } => {
            let campaign = load_campaign(deps, id)?;
            Ok(to_binary(&(campaign.beneficiaries.len() as u64))?)
        }
        QueryMsg::CampaignBeneficiary { id, index } => {
            Ok(to_binary(&query_campaign_beneficiary(deps, id, index)?)?)
        }
        QueryMsg::UserCampaignCount { address } => {
            let ids = admin_campaigns(deps, address)?;
            Ok(to_binary(&(ids.len() as u64))?)
        }
        QueryMsg::UserCampaignId { address, index } => {
            let ids = admin_campaigns(deps, address)?;
            Ok(to_binary(&indexed(&ids, index)?)?)
        }
        QueryMsg::UserClaimsCount { address } => {
            let ids = user_claims(deps, address)?;
            Ok(to_binary(&(ids.len() as u64))?)
        }
        QueryMsg::UserClaim { address, index } => {
            let ids = user_claims(deps, address)?;
            Ok(to_binary(&indexed(&ids, index)?)?)
        }
    }
}

fn load_campaign(deps: Deps, id: u64) -> Result<Campaign, ContractError> {
    CAMPAIGNS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::CampaignNotFound { id })
}

fn admin_campaigns(deps: Deps, address: String) -> StdResult<Vec<u64>> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(ADMIN_CAMPAIGNS
        .may_load(deps.storage, &addr)?
        .unwrap_or_default())
}

fn user_claims(deps: Deps, address: String) -> StdResult<Vec<u64>> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(USER_CLAIMS
        .may_load(deps.storage, &addr)?
        .unwrap_or_default())
}

fn indexed<T: Copy>(items: &[T], index: u64) -> Result<T, ContractError> {
    items
        .get(index as usize)
        .copied()
        .ok_or(ContractError::IndexOutOfRange {})
}

pub fn query_is_admin(deps: Deps, address: String) -> StdResult<bool> {
    let cfg = ADMIN_LIST.load(deps.storage)?;
    Ok(cfg.is_admin(deps.api.addr_validate(&address)?))
}

pub fn query_campaign(deps: Deps, id: u64) -> Result<CampaignResponse, ContractError> {
    let campaign = load_campaign(deps, id)?;
    Ok(CampaignResponse {
        id,
        admin: campaign.admin,
        token: campaign.token,
        balance: campaign.balance,
        claim_amount: campaign.claim_amount,
        active: campaign.active,
        cancelled: campaign.cancelled,
    })
}

/// Accrued, un-withdrawn reward; 0 for principals that never claimed or
/// already withdrew, and for unknown campaigns.
pub fn query_reward(deps: Deps, id: u64, address: String) -> StdResult<Uint128> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(REWARDS
        .may_load(deps.storage, (id, &addr))?
        .unwrap_or_default())
}

pub fn query_is_campaign_admin(deps: Deps, id: u64, address: String) -> StdResult<bool> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(CAMPAIGNS
        .may_load(deps.storage, id)?
        .map(|c| c.admin == addr)
        .unwrap_or(false))
}

pub fn query_is_campaign_beneficiary(deps: Deps, id: u64, address: String) -> StdResult<bool> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(CAMPAIGNS
        .may_load(deps.storage, id)?
        .map(|c| c.is_beneficiary(&addr))
        .unwrap_or(false))
}

pub fn query_campaign_beneficiary(deps: Deps, id: u64, index: u64) -> Result<Addr, ContractError> {
    let campaign = load_campaign(deps, id)?;
    campaign
        .beneficiaries
        .get(index as usize)
        .cloned()
        .ok_or(ContractError::IndexOutOfRange {})
}

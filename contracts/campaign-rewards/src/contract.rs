#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, coins, to_binary, Addr, BankMsg, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response,
    Uint128, WasmMsg,
};
use cw2::{get_contract_version, set_contract_version};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_utils::must_pay;

use crate::claim::authorize_claim;
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg};
use crate::state::{
    AdminList, Campaign, Config, ADMIN_CAMPAIGNS, ADMIN_LIST, CAMPAIGNS, CAMPAIGN_COUNT, CONFIG,
    FEE_POOL, PAUSED, REWARDS, USER_CLAIMS,
};

// Version info, for migration info
const CONTRACT_NAME: &str = "crates.io:campaign-rewards";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const PUBKEY_LEN: usize = 33;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut admins = msg
        .admins
        .iter()
        .map(|a| deps.api.addr_validate(a))
        .collect::<Result<Vec<_>, _>>()?;
    if admins.is_empty() {
        admins.push(info.sender);
    }
    ADMIN_LIST.save(deps.storage, &AdminList { admins })?;

    PAUSED.save(deps.storage, &false)?;
    FEE_POOL.save(deps.storage, &Uint128::zero())?;
    CAMPAIGN_COUNT.save(deps.storage, &0u64)?;

    let config = Config {
        fee_denom: msg.fee_denom,
        campaign_fee: msg.campaign_fee,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("campaign_fee", config.campaign_fee),
        attr("fee_denom", config.fee_denom),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddAdmin { address } => execute_add_admin(deps, info, address),
        ExecuteMsg::RemoveAdmin { address } => execute_remove_admin(deps, info, address),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::SetCampaignFee { fee } => execute_set_campaign_fee(deps, info, fee),
        ExecuteMsg::WithdrawFees {} => execute_withdraw_fees(deps, info),
        ExecuteMsg::CreateCampaign {
            token,
            deposit_amount,
            claim_amount,
            admin_pubkey,
        } => execute_create_campaign(deps, env, info, token, deposit_amount, claim_amount, admin_pubkey),
        ExecuteMsg::SuspendCampaign { id } => execute_set_active(deps, info, id, false),
        ExecuteMsg::ResumeCampaign { id } => execute_set_active(deps, info, id, true),
        ExecuteMsg::CancelCampaign { id } => execute_cancel_campaign(deps, info, id),
        ExecuteMsg::ClaimReward {
            id,
            nonce,
            signature,
        } => execute_claim_reward(deps, info, id, nonce, signature),
        ExecuteMsg::WithdrawReward { id } => execute_withdraw_reward(deps, info, id),
    }
}

fn ensure_admin(deps: &DepsMut, sender: &Addr) -> Result<(), ContractError> {
    let cfg = ADMIN_LIST.load(deps.storage)?;
    if !cfg.is_admin(sender) {
        return Err(ContractError::Unauthorized {
            sender: sender.clone(),
        });
    }
    Ok(())
}

fn load_campaign(deps: &DepsMut, id: u64) -> Result<Campaign, ContractError> {
    CAMPAIGNS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::CampaignNotFound { id })
}

fn ensure_not_paused(deps: &DepsMut) -> Result<(), ContractError> {
    if PAUSED.load(deps.storage)? {
        return Err(ContractError::Paused {});
    }
    Ok(())
}

pub fn execute_add_admin(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;
    let addr = deps.api.addr_validate(&address)?;

    let mut cfg = ADMIN_LIST.load(deps.storage)?;
    // adding an existing admin is a no-op
    if !cfg.is_admin(&addr) {
        cfg.admins.push(addr.clone());
        ADMIN_LIST.save(deps.storage, &cfg)?;
    }

    Ok(Response::new().add_attributes(vec![attr("action", "add_admin"), attr("address", addr)]))
}

pub fn execute_remove_admin(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;
    let addr = deps.api.addr_validate(&address)?;

    let mut cfg = ADMIN_LIST.load(deps.storage)?;
    if cfg.is_admin(&addr) {
        if cfg.admins.len() == 1 {
            return Err(ContractError::CannotRemoveLastAdmin {});
        }
        cfg.admins.retain(|a| a != &addr);
        ADMIN_LIST.save(deps.storage, &cfg)?;
    }

    Ok(Response::new().add_attributes(vec![attr("action", "remove_admin"), attr("address", addr)]))
}

pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;

    if PAUSED.load(deps.storage)? {
        return Err(ContractError::AlreadyPaused {});
    }
    PAUSED.save(deps.storage, &true)?;

    Ok(Response::new().add_attributes(vec![attr("action", "pause"), attr("paused", "true")]))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;

    if !PAUSED.load(deps.storage)? {
        return Err(ContractError::NotPaused {});
    }
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new().add_attributes(vec![attr("action", "unpause"), attr("paused", "false")]))
}

pub fn execute_set_campaign_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.campaign_fee = fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attributes(vec![attr("action", "set_campaign_fee"), attr("fee", fee)]))
}

pub fn execute_withdraw_fees(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_admin(&deps, &info.sender)?;

    let pool = FEE_POOL.load(deps.storage)?;
    if pool.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }
    FEE_POOL.save(deps.storage, &Uint128::zero())?;

    let config = CONFIG.load(deps.storage)?;
    let bank_msg = CosmosMsg::Bank(BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(pool.u128(), config.fee_denom),
    });

    Ok(Response::new().add_message(bank_msg).add_attributes(vec![
        attr("action", "withdraw_fees"),
        attr("recipient", info.sender),
        attr("amount", pool),
    ]))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_create_campaign(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    deposit_amount: Uint128,
    claim_amount: Uint128,
    admin_pubkey: Binary,
) -> Result<Response, ContractError> {
    ensure_not_paused(&deps)?;

    let config = CONFIG.load(deps.storage)?;
    let paid = if info.funds.is_empty() {
        Uint128::zero()
    } else {
        must_pay(&info, &config.fee_denom)?
    };
    if paid < config.campaign_fee {
        return Err(ContractError::InsufficientFee {
            required: config.campaign_fee,
            sent: paid,
        });
    }

    if claim_amount.is_zero() {
        return Err(ContractError::ZeroClaimAmount {});
    }
    // the escrow must split into whole claims
    if deposit_amount.u128() % claim_amount.u128() != 0 {
        return Err(ContractError::UnevenDeposit {});
    }
    if admin_pubkey.len() != PUBKEY_LEN {
        return Err(ContractError::InvalidPubkey {});
    }

    let token = deps.api.addr_validate(&token)?;

    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        token.clone(),
        &Cw20QueryMsg::Allowance {
            owner: info.sender.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;
    if allowance.allowance < deposit_amount {
        return Err(ContractError::InsufficientAllowance {});
    }
    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        token.clone(),
        &Cw20QueryMsg::Balance {
            address: info.sender.to_string(),
        },
    )?;
    if balance.balance < deposit_amount {
        return Err(ContractError::InsufficientFunds {});
    }

    let id = CAMPAIGN_COUNT.load(deps.storage)? + 1;
    CAMPAIGN_COUNT.save(deps.storage, &id)?;

    let campaign = Campaign {
        admin: info.sender.clone(),
        admin_pubkey,
        token: token.clone(),
        balance: deposit_amount,
        claim_amount,
        active: true,
        cancelled: false,
        beneficiaries: vec![],
    };
    CAMPAIGNS.save(deps.storage, id, &campaign)?;

    ADMIN_CAMPAIGNS.update(deps.storage, &info.sender, |ids| -> Result<_, ContractError> {
        let mut ids = ids.unwrap_or_default();
        ids.push(id);
        Ok(ids)
    })?;

    // full attached amount is retained, no refund of excess
    FEE_POOL.update(deps.storage, |pool| -> Result<_, ContractError> {
        Ok(pool.checked_add(paid)?)
    })?;

    let escrow_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount: deposit_amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new().add_message(escrow_msg).add_attributes(vec![
        attr("action", "create_campaign"),
        attr("id", id.to_string()),
        attr("admin", info.sender),
        attr("deposit", deposit_amount),
        attr("claim_amount", claim_amount),
    ]))
}

pub fn execute_set_active(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
    active: bool,
) -> Result<Response, ContractError> {
    let mut campaign = load_campaign(&deps, id)?;
    if campaign.admin != info.sender {
        return Err(ContractError::Unauthorized {
            sender: info.sender,
        });
    }
    ensure_not_paused(&deps)?;
    if campaign.cancelled {
        return Err(ContractError::CampaignCancelled {});
    }

    campaign.active = active;
    CAMPAIGNS.save(deps.storage, id, &campaign)?;

    let action = if active {
        "resume_campaign"
    } else {
        "suspend_campaign"
    };
    Ok(Response::new()
        .add_attributes(vec![attr("action", action), attr("id", id.to_string())]))
}

pub fn execute_cancel_campaign(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    // deliberately not gated on pause: an admin can always exit a campaign
    let mut campaign = load_campaign(&deps, id)?;
    if campaign.admin != info.sender {
        return Err(ContractError::Unauthorized {
            sender: info.sender,
        });
    }
    if campaign.cancelled {
        return Err(ContractError::AlreadyCancelled {});
    }

    let remainder = campaign.balance;
    campaign.balance = Uint128::zero();
    campaign.cancelled = true;
    campaign.active = false;
    CAMPAIGNS.save(deps.storage, id, &campaign)?;

    if !remainder.is_zero() {
        REWARDS.update(deps.storage, (id, &info.sender), |r| -> Result<_, ContractError> {
            Ok(r.unwrap_or_default().checked_add(remainder)?)
        })?;
        USER_CLAIMS.update(deps.storage, &info.sender, |ids| -> Result<_, ContractError> {
            let mut ids = ids.unwrap_or_default();
            ids.push(id);
            Ok(ids)
        })?;
    }

    Ok(Response::new().add_attributes(vec![
        attr("action", "cancel_campaign"),
        attr("id", id.to_string()),
        attr("remainder", remainder),
    ]))
}

pub fn execute_claim_reward(
    mut deps: DepsMut,
    info: MessageInfo,
    id: u64,
    nonce: String,
    signature: Binary,
) -> Result<Response, ContractError> {
    ensure_not_paused(&deps)?;

    let mut campaign = load_campaign(&deps, id)?;
    if !campaign.is_claimable() {
        return Err(ContractError::CampaignNotActive {});
    }
    if campaign.balance < campaign.claim_amount {
        return Err(ContractError::InsufficientCampaignBalance {});
    }

    authorize_claim(&mut deps, &campaign, &nonce, &info.sender, &signature)?;

    let claim_amount = campaign.claim_amount;
    campaign.balance = campaign.balance.checked_sub(claim_amount)?;
    if !campaign.is_beneficiary(&info.sender) {
        campaign.beneficiaries.push(info.sender.clone());
    }
    CAMPAIGNS.save(deps.storage, id, &campaign)?;

    REWARDS.update(deps.storage, (id, &info.sender), |r| -> Result<_, ContractError> {
        Ok(r.unwrap_or_default().checked_add(claim_amount)?)
    })?;
    USER_CLAIMS.update(deps.storage, &info.sender, |ids| -> Result<_, ContractError> {
        let mut ids = ids.unwrap_or_default();
        ids.push(id);
        Ok(ids)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "claim_reward"),
        attr("id", id.to_string()),
        attr("claimant", info.sender),
        attr("amount", claim_amount),
    ]))
}

pub fn execute_withdraw_reward(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    // deliberately not gated on pause: accrued rewards stay withdrawable
    let due = REWARDS
        .may_load(deps.storage, (id, &info.sender))?
        .unwrap_or_default();
    if due.is_zero() {
        return Err(ContractError::NothingDue {});
    }

    REWARDS.remove(deps.storage, (id, &info.sender));
    // only this campaign's entries are cleared from the claim index
    USER_CLAIMS.update(deps.storage, &info.sender, |ids| -> Result<_, ContractError> {
        let mut ids = ids.unwrap_or_default();
        ids.retain(|c| *c != id);
        Ok(ids)
    })?;

    let campaign = load_campaign(&deps, id)?;
    let payout_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: campaign.token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount: due,
        })?,
        funds: vec![],
    });

    Ok(Response::new().add_message(payout_msg).add_attributes(vec![
        attr("action", "withdraw_reward"),
        attr("id", id.to_string()),
        attr("recipient", info.sender),
        attr("amount", due),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let version = get_contract_version(deps.storage)?;
    if version.contract != CONTRACT_NAME {
        return Err(ContractError::CannotMigrate {
            previous_contract: version.contract,
        });
    }
    Ok(Response::default())
}

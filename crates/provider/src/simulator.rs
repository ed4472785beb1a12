//! Simulated wallet provider
//!
//! Answers the provider's account, cash-in and transfer calls from a
//! [`Dataset`] snapshot. Nothing here mutates the dataset: confirmations echo
//! their inputs with fresh references, the same way the real sandbox does.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::str::FromStr;
use synergos_core::{Dataset, TransactionStatus};

use crate::codes;
use crate::error::{ProviderError, ProviderResult};
use crate::messages::*;

/// Placeholder the provider returns for dates it never fills in
const EMPTY_DATE: &str = "0001-01-01T00:00:00Z";
const HISTORY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const DEFAULT_FEES: &str = "0.0";
const CASHIN_FEE_DETAIL: &str = "[{Nature:\"COM\",InvariantFee:0.000,VariantFee:0.0000000}]";

/// Wallet provider simulator
pub struct WalletProvider {
    rng: StdRng,
    currency: String,
    clock: Option<DateTime<Utc>>,
}

impl WalletProvider {
    /// Provider with an entropy-seeded generator
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            currency: currency.into(),
            clock: None,
        }
    }

    /// Provider with a reproducible generator
    pub fn seeded(currency: impl Into<String>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            currency: currency.into(),
            clock: None,
        }
    }

    /// Pin the clock used for tokens and contract ids
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    // === Wallet creation ===

    /// Pre-create a client and issue the activation OTP
    pub fn precreate(&mut self, req: &PrecreateRequest) -> Envelope<PrecreateResult> {
        let now = self.now();
        let otp = codes::otp(&mut self.rng);
        let token = codes::token(&mut self.rng, now);

        tracing::info!(phone = %req.phone_number, "Wallet pre-created");

        let text = |field: &Option<String>, fallback: &str| {
            field.clone().unwrap_or_else(|| fallback.to_string())
        };

        Envelope::new(PrecreateResult {
            activity_area: None,
            address_line1: text(&req.client_address, ""),
            address_line2: None,
            address_line3: None,
            address_line4: None,
            agence_id: "211".to_string(),
            average_income: None,
            birth_day: None,
            channel_id: "P".to_string(),
            city: None,
            country: None,
            date_of_birth: text(&req.date_of_birth, ""),
            distributeur_id: "000104".to_string(),
            document_expiry_date1: None,
            document_expiry_date2: None,
            document_scan1: String::new(),
            document_scan2: String::new(),
            document_type1: String::new(),
            document_type2: None,
            email: text(&req.email, ""),
            family_status: None,
            first_name: text(&req.client_first_name, "User"),
            fonction: None,
            gender: text(&req.gender, ""),
            institution_id: "0001".to_string(),
            land_line_number: None,
            last_name: text(&req.client_last_name, "Test"),
            legal_id1: text(&req.legal_id, ""),
            legal_id2: None,
            level: None,
            mailaddress: None,
            mobile_number: req.phone_number.clone(),
            nationalite: None,
            numberofchildren: None,
            opt_field1: None,
            opt_field2: None,
            otp,
            phone_number: None,
            place_of_birth: text(&req.place_of_birth, ""),
            post_code: None,
            product_id: "000".to_string(),
            product_type_id: "000".to_string(),
            profession: None,
            provider: text(&req.phone_operator, "IAM"),
            raison_social: None,
            region: None,
            registration_date: None,
            title: None,
            token,
        })
    }

    /// Activate a pre-created wallet and assign its contract id
    pub fn activate(&mut self) -> Envelope<ActivateResult> {
        let now = self.now();
        let contract_id = codes::contract_id(&mut self.rng, now);
        let rib = codes::rib(&mut self.rng);

        tracing::info!(contract_id = %contract_id, "Wallet activated");

        Envelope::new(ActivateResult {
            contract_id,
            reference: String::new(),
            level: "000".to_string(),
            rib,
        })
    }

    // === Account queries ===

    /// Balance of a user or group wallet; unknown contracts read as zero
    pub fn balance(
        &self,
        dataset: &Dataset,
        contract_id: Option<&str>,
    ) -> ProviderResult<Envelope<BalanceResult>> {
        let contract_id = contract_id
            .filter(|id| !id.is_empty())
            .ok_or(ProviderError::MissingContractId)?;

        let balance = dataset
            .users
            .iter()
            .find(|u| u.contract_id == contract_id)
            .map(|u| u.balance)
            .or_else(|| {
                dataset
                    .groups
                    .iter()
                    .find(|g| g.contract_id == contract_id)
                    .map(|g| g.balance)
            })
            .unwrap_or(Decimal::ZERO);

        Ok(Envelope::new(BalanceResult {
            balance: vec![BalanceLine {
                value: fixed2(balance),
            }],
        }))
    }

    /// Client profile looked up by phone number
    pub fn client_info(
        &mut self,
        dataset: &Dataset,
        phone_number: &str,
    ) -> ProviderResult<Envelope<ClientInfo>> {
        let user = dataset
            .users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .ok_or_else(|| ProviderError::UserNotFound(phone_number.to_string()))?;

        let solde = fixed2(user.balance);
        let product = Product {
            abbreviation: None,
            contract_id: user.contract_id.clone(),
            description: None,
            email: user.email.clone(),
            level: String::new(),
            name: "CDP BASIC".to_string(),
            phone_number: user.phone_number.clone(),
            product_type_id: "000".to_string(),
            product_type_name: "PARTICULIER".to_string(),
            provider: "ORANGE".to_string(),
            rib: codes::rib(&mut self.rng),
            solde: solde.clone(),
            status_id: "1".to_string(),
            tier_type: "03".to_string(),
            uid: "000".to_string(),
        };

        Ok(Envelope::new(ClientInfo {
            address_line1: " ".to_string(),
            city: user
                .location
                .as_ref()
                .map(|l| l.city.clone())
                .unwrap_or_default(),
            contract_id: user.contract_id.clone(),
            country: "MAR".to_string(),
            description: None,
            email: user.email.clone(),
            number_of_children: None,
            phone_number: user.phone_number.clone(),
            pid_number: None,
            pid_type: String::new(),
            products: vec![product],
            radical: String::new(),
            solde_cumule: solde,
            status_id: None,
            tier_first_name: user.first_name.clone(),
            tier_id: format!("TR{}", self.now().timestamp_millis()),
            tier_last_name: user.last_name.clone(),
            user_name: None,
            family_status: None,
        }))
    }

    /// Operation history; every recorded transaction is listed
    pub fn history(
        &self,
        dataset: &Dataset,
        contract_id: Option<&str>,
    ) -> ProviderResult<Envelope<Vec<OperationRecord>>> {
        contract_id
            .filter(|id| !id.is_empty())
            .ok_or(ProviderError::MissingContractId)?;

        let total = dataset.transactions.len();
        let rows = dataset
            .transactions
            .iter()
            .map(|txn| {
                let proposer = dataset.user(&txn.proposed_by);
                OperationRecord {
                    amount: txn.amount.to_fixed2(),
                    fees: txn.fees.to_fixed2(),
                    beneficiary_first_name: proposer
                        .map(|u| u.first_name.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    beneficiary_last_name: proposer
                        .map(|u| u.last_name.clone())
                        .unwrap_or_else(|| "User".to_string()),
                    beneficiary_rib: None,
                    client_note: Some(txn.description.clone()),
                    contract_id: None,
                    currency: self.currency.clone(),
                    date: Some(txn.created_at.format(HISTORY_DATE_FORMAT).to_string()),
                    date_to_compare: EMPTY_DATE.to_string(),
                    frais: Vec::new(),
                    num_tel: None,
                    operation: None,
                    reference_id: txn.id.clone(),
                    sign: None,
                    src_dest_number: Some(
                        proposer.map(|u| u.phone_number.clone()).unwrap_or_default(),
                    ),
                    status: Some(history_status(txn.status).to_string()),
                    total_amount: txn.amount.to_fixed2(),
                    total_frai: txn.fees.to_fixed2(),
                    kind: txn.kind.as_str().to_uppercase(),
                    is_canceled: false,
                    is_tier_cash_in: false,
                    total_page: Some(total),
                }
            })
            .collect();

        Ok(Envelope::new(rows))
    }

    // === Cash-in ===

    pub fn cashin_simulate(
        &mut self,
        req: &CashinSimulateRequest,
    ) -> ProviderResult<Envelope<CashinSimulateResult>> {
        let amount = parse_amount(&req.amount)?;
        let now = self.now();

        Ok(Envelope::new(CashinSimulateResult {
            fees: fees_or_default(&req.fees),
            fee_detail: CASHIN_FEE_DETAIL.to_string(),
            token: codes::token(&mut self.rng, now),
            amount_to_collect: amount,
            is_tier: true,
            card_id: req.contract_id.clone(),
            transaction_id: codes::reference_id(&mut self.rng),
            ben_first_name: "User".to_string(),
            ben_last_name: "Name".to_string(),
        }))
    }

    pub fn cashin_confirm(
        &mut self,
        req: &CashinConfirmRequest,
    ) -> ProviderResult<Envelope<CashinConfirmResult>> {
        let amount = parse_amount(&req.amount)?;
        let reference = codes::reference_id(&mut self.rng);

        tracing::info!(token = %req.token, reference = %reference, "Cash-in confirmed");

        Ok(Envelope::new(CashinConfirmResult {
            fees: fees_or_default(&req.fees),
            fee_details: None,
            token: req.token.clone(),
            amount,
            transaction_reference: reference,
            opt_field_output1: None,
            opt_field_output2: None,
            card_id: req.contract_id.clone().unwrap_or_default(),
        }))
    }

    // === Transfers ===

    /// Issue a transfer OTP
    pub fn transfer_otp(&mut self) -> Envelope<Vec<OtpCode>> {
        Envelope::new(vec![OtpCode {
            code_otp: codes::otp(&mut self.rng),
        }])
    }

    pub fn transfer_simulate(
        &mut self,
        dataset: &Dataset,
        req: &TransferSimulateRequest,
    ) -> ProviderResult<Envelope<OperationRecord>> {
        parse_amount(&req.amount)?;
        let destination = dataset.user(&req.destination_user_id);
        if destination.is_none() {
            tracing::debug!(user_id = %req.destination_user_id, "Unknown transfer destination");
        }

        let fee = FeeLine {
            currency: self.currency.clone(),
            full_name: String::new(),
            name: "COM".to_string(),
            reference_id: codes::reference_id(&mut self.rng),
            value: 0,
        };

        Ok(Envelope::new(OperationRecord {
            amount: req.amount.clone(),
            fees: fees_or_default(&req.fees),
            beneficiary_first_name: destination
                .map(|u| u.first_name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            beneficiary_last_name: destination
                .map(|u| u.last_name.clone())
                .unwrap_or_else(|| "User".to_string()),
            beneficiary_rib: None,
            client_note: None,
            contract_id: None,
            currency: self.currency.clone(),
            date: None,
            date_to_compare: EMPTY_DATE.to_string(),
            frais: vec![fee],
            num_tel: None,
            operation: None,
            reference_id: codes::reference_id(&mut self.rng),
            sign: None,
            src_dest_number: None,
            status: None,
            total_amount: req.amount.clone(),
            total_frai: "0.00".to_string(),
            kind: "TT".to_string(),
            is_canceled: false,
            is_tier_cash_in: false,
            total_page: None,
        }))
    }

    pub fn transfer_confirm(
        &self,
        req: &TransferConfirmRequest,
    ) -> ProviderResult<Envelope<TransferConfirmResult>> {
        parse_amount(&req.amount)?;

        tracing::info!(amount = %req.amount, "Transfer confirmed");

        Ok(Envelope::new(TransferConfirmResult {
            item1: TransferMovement {
                credit_amounts: None,
                debit_amounts: None,
                depot: None,
                retrait: None,
                value: format!("-{}", req.amount),
            },
            item2: "000".to_string(),
            item3: "Successful".to_string(),
        }))
    }
}

fn history_status(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Completed => "000",
        _ => "001",
    }
}

fn fixed2(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn fees_or_default(fees: &Option<String>) -> String {
    fees.clone().unwrap_or_else(|| DEFAULT_FEES.to_string())
}

fn parse_amount(raw: &str) -> ProviderResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| ProviderError::InvalidAmount(raw.to_string()))
}

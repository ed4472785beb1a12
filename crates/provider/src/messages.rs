//! Request and response payloads, named exactly as the provider names them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every provider answer is wrapped in `{"result": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

// === Requests ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecreateRequest {
    pub phone_number: String,
    #[serde(default)]
    pub client_first_name: Option<String>,
    #[serde(default)]
    pub client_last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub legal_id: Option<String>,
    #[serde(default)]
    pub phone_operator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashinSimulateRequest {
    #[serde(default)]
    pub contract_id: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub fees: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashinConfirmRequest {
    pub token: String,
    pub amount: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub fees: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSimulateRequest {
    pub amount: String,
    pub destination_user_id: String,
    #[serde(default)]
    pub fees: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferConfirmRequest {
    pub amount: String,
}

// === Wallet creation ===

/// Pre-created client record; most fields are filled in by later KYC steps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecreateResult {
    pub activity_area: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub address_line4: Option<String>,
    pub agence_id: String,
    pub average_income: Option<String>,
    pub birth_day: Option<String>,
    pub channel_id: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub date_of_birth: String,
    pub distributeur_id: String,
    pub document_expiry_date1: Option<String>,
    pub document_expiry_date2: Option<String>,
    pub document_scan1: String,
    pub document_scan2: String,
    pub document_type1: String,
    pub document_type2: Option<String>,
    pub email: String,
    pub family_status: Option<String>,
    pub first_name: String,
    pub fonction: Option<String>,
    pub gender: String,
    pub institution_id: String,
    pub land_line_number: Option<String>,
    pub last_name: String,
    pub legal_id1: String,
    pub legal_id2: Option<String>,
    pub level: Option<String>,
    pub mailaddress: Option<String>,
    pub mobile_number: String,
    pub nationalite: Option<String>,
    pub numberofchildren: Option<String>,
    pub opt_field1: Option<String>,
    pub opt_field2: Option<String>,
    pub otp: String,
    pub phone_number: Option<String>,
    pub place_of_birth: String,
    pub post_code: Option<String>,
    pub product_id: String,
    pub product_type_id: String,
    pub profession: Option<String>,
    pub provider: String,
    pub raison_social: Option<String>,
    pub region: Option<String>,
    pub registration_date: Option<String>,
    pub title: Option<String>,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateResult {
    pub contract_id: String,
    pub reference: String,
    pub level: String,
    pub rib: String,
}

// === Account queries ===

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceLine {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceResult {
    pub balance: Vec<BalanceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub abbreviation: Option<String>,
    pub contract_id: String,
    pub description: Option<String>,
    pub email: String,
    pub level: String,
    pub name: String,
    pub phone_number: String,
    pub product_type_id: String,
    pub product_type_name: String,
    pub provider: String,
    pub rib: String,
    pub solde: String,
    pub status_id: String,
    pub tier_type: String,
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(rename = "adressLine1")]
    pub address_line1: String,
    pub city: String,
    pub contract_id: String,
    pub country: String,
    pub description: Option<String>,
    pub email: String,
    pub number_of_children: Option<u32>,
    pub phone_number: String,
    #[serde(rename = "pidNUmber")]
    pub pid_number: Option<String>,
    pub pid_type: String,
    pub products: Vec<Product>,
    pub radical: String,
    pub solde_cumule: String,
    pub status_id: Option<String>,
    pub tier_first_name: String,
    pub tier_id: String,
    pub tier_last_name: String,
    pub user_name: Option<String>,
    pub family_status: Option<String>,
}

/// One fee component of an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLine {
    pub currency: String,
    pub full_name: String,
    pub name: String,
    pub reference_id: String,
    pub value: u32,
}

/// An operation as listed in history or returned by a transfer simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub amount: String,
    #[serde(rename = "Fees")]
    pub fees: String,
    pub beneficiary_first_name: String,
    pub beneficiary_last_name: String,
    #[serde(rename = "beneficiaryRIB")]
    pub beneficiary_rib: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_note: Option<String>,
    pub contract_id: Option<String>,
    pub currency: String,
    pub date: Option<String>,
    pub date_to_compare: String,
    pub frais: Vec<FeeLine>,
    pub num_tel: Option<String>,
    pub operation: Option<String>,
    pub reference_id: String,
    pub sign: Option<String>,
    pub src_dest_number: Option<String>,
    pub status: Option<String>,
    pub total_amount: String,
    pub total_frai: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_canceled: bool,
    pub is_tier_cash_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_page: Option<usize>,
}

// === Cash-in ===

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashinSimulateResult {
    #[serde(rename = "Fees")]
    pub fees: String,
    pub fee_detail: String,
    pub token: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_to_collect: Decimal,
    pub is_tier: bool,
    pub card_id: Option<String>,
    pub transaction_id: String,
    pub ben_first_name: String,
    pub ben_last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashinConfirmResult {
    #[serde(rename = "Fees")]
    pub fees: String,
    pub fee_details: Option<String>,
    pub token: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_reference: String,
    pub opt_field_output1: Option<String>,
    pub opt_field_output2: Option<String>,
    pub card_id: String,
}

// === Transfers ===

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpCode {
    pub code_otp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMovement {
    pub credit_amounts: Option<String>,
    pub debit_amounts: Option<String>,
    pub depot: Option<String>,
    pub retrait: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferConfirmResult {
    pub item1: TransferMovement,
    pub item2: String,
    pub item3: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_field_names() {
        let result = CashinConfirmResult {
            fees: "0.0".to_string(),
            fee_details: None,
            token: "TR1".to_string(),
            amount: dec!(120.5),
            transaction_reference: "0000000042".to_string(),
            opt_field_output1: None,
            opt_field_output2: None,
            card_id: String::new(),
        };

        let json = serde_json::to_value(Envelope::new(result)).unwrap();
        let body = &json["result"];
        assert_eq!(body["Fees"], "0.0");
        assert_eq!(body["amount"], 120.5);
        assert_eq!(body["transactionReference"], "0000000042");
        assert!(body["optFieldOutput1"].is_null());
    }

    #[test]
    fn test_request_optional_fields() {
        let req: TransferSimulateRequest =
            serde_json::from_str(r#"{"amount": "10", "destinationUserId": "user2"}"#).unwrap();
        assert_eq!(req.destination_user_id, "user2");
        assert!(req.fees.is_none());
    }
}

//! Mock account data for demo mode.
//!
//! Demo mode never talks to a wallet. The balance and transaction list are
//! baked into the binary from `assets/demo_account.json`.

use alloy_primitives::U256;
use alloy_primitives::utils::{UnitsError, format_ether, parse_ether};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address shown for the demo session.
pub const DEMO_ADDRESS: &str = "0xd3e0000000000000000000000000000000000000";

/// Decimals shown for demo totals.
const TOTAL_DECIMALS: usize = 4;

/// Embedded demo data.
const DEMO_ACCOUNT_JSON: &str = include_str!("../assets/demo_account.json");

/// Demo data that could not be loaded.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid demo data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid ETH amount '{amount}': {source}")]
    Amount {
        amount: String,
        #[source]
        source: UnitsError,
    },
}

fn parse_amount(amount: &str) -> Result<U256, DemoError> {
    parse_ether(amount).map_err(|source| DemoError::Amount {
        amount: amount.to_string(),
        source,
    })
}

/// Direction of a mock transfer relative to the demo account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockTransaction {
    pub hash: String,
    pub direction: Direction,
    pub counterparty: String,
    /// Decimal ETH amount as text.
    pub amount: String,
    /// Unix seconds.
    pub timestamp: u64,
    /// `amount` in wei, filled in by [`DemoAccount::parse`].
    #[serde(skip)]
    wei: U256,
}

/// Mocked balance and history for the demo session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoAccount {
    #[serde(default)]
    pub address: String,
    pub network: String,
    pub chain_id: u64,
    /// Decimal ETH balance as text.
    pub balance: String,
    pub transactions: Vec<MockTransaction>,
}

impl DemoAccount {
    /// Parse the embedded data for [`DEMO_ADDRESS`].
    pub fn load() -> Result<Self, DemoError> {
        Self::parse(DEMO_ACCOUNT_JSON)
    }

    /// Parse demo data from JSON. Every amount must be a valid ETH value.
    pub fn parse(json: &str) -> Result<Self, DemoError> {
        let mut account: DemoAccount = serde_json::from_str(json)?;
        parse_amount(&account.balance)?;
        for tx in &mut account.transactions {
            tx.wei = parse_amount(&tx.amount)?;
        }
        if account.address.is_empty() {
            account.address = DEMO_ADDRESS.to_string();
        }
        Ok(account)
    }

    /// Same data, shown under another address.
    pub fn for_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Total received, formatted to 4 decimals.
    pub fn total_received(&self) -> String {
        format_total(self.sum(Direction::Received))
    }

    /// Total sent, formatted to 4 decimals.
    pub fn total_sent(&self) -> String {
        format_total(self.sum(Direction::Sent))
    }

    fn sum(&self, direction: Direction) -> U256 {
        self.transactions
            .iter()
            .filter(|tx| tx.direction == direction)
            .fold(U256::ZERO, |total, tx| total.saturating_add(tx.wei))
    }

    /// Transactions newest first.
    pub fn recent(&self) -> Vec<&MockTransaction> {
        let mut txs: Vec<_> = self.transactions.iter().collect();
        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        txs
    }
}

/// Wei as ETH, truncated to [`TOTAL_DECIMALS`] places.
fn format_total(wei: U256) -> String {
    let ether = format_ether(wei);
    let (whole, fraction) = ether.split_once('.').unwrap_or((ether.as_str(), ""));
    let fraction: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(TOTAL_DECIMALS)
        .collect();
    format!("{}.{}", whole, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_loads() {
        let account = DemoAccount::load().unwrap();
        assert_eq!(account.address, DEMO_ADDRESS);
        assert_eq!(account.chain_id, 1);
        assert_eq!(account.balance, "4.2069");
        assert_eq!(account.transactions.len(), 4);
    }

    #[test]
    fn test_totals() {
        let account = DemoAccount::load().unwrap();
        assert_eq!(account.total_received(), "4.5000");
        assert_eq!(account.total_sent(), "0.2931");
    }

    #[test]
    fn test_recent_is_newest_first() {
        let account = DemoAccount::load().unwrap();
        let stamps: Vec<u64> = account.recent().iter().map(|tx| tx.timestamp).collect();
        assert_eq!(stamps, vec![1718640000, 1718035200, 1717430400, 1717171200]);
    }

    #[test]
    fn test_explicit_address_is_kept() {
        let json = r#"{"address":"0xabc","network":"Sepolia","chainId":11155111,"balance":"0","transactions":[]}"#;
        let account = DemoAccount::parse(json).unwrap();
        assert_eq!(account.address, "0xabc");
        assert_eq!(account.total_sent(), "0.0000");
    }

    #[test]
    fn test_direction_without_transactions_is_zero() {
        let json = r#"{"network":"Ethereum","chainId":1,"balance":"1","transactions":[
            {"hash":"0x01","direction":"received","counterparty":"0x02","amount":"2.5","timestamp":1}
        ]}"#;
        let account = DemoAccount::parse(json).unwrap();
        assert_eq!(account.total_received(), "2.5000");
        assert_eq!(account.total_sent(), "0.0000");
    }

    #[test]
    fn test_rejects_malformed_amount() {
        let json = r#"{"network":"Ethereum","chainId":1,"balance":"1","transactions":[
            {"hash":"0x01","direction":"sent","counterparty":"0x02","amount":"lots","timestamp":1}
        ]}"#;
        let err = DemoAccount::parse(json).unwrap_err();
        assert!(matches!(err, DemoError::Amount { ref amount, .. } if amount == "lots"));

        let bad_balance = r#"{"network":"Ethereum","chainId":1,"balance":"?","transactions":[]}"#;
        assert!(matches!(
            DemoAccount::parse(bad_balance),
            Err(DemoError::Amount { .. })
        ));
    }

    #[test]
    fn test_demo_address_is_hex() {
        assert!(DEMO_ADDRESS.parse::<alloy_primitives::Address>().is_ok());
    }

    #[test]
    fn test_format_total_truncates() {
        assert_eq!(format_total(U256::ZERO), "0.0000");
        assert_eq!(format_total(parse_ether("1.23456").unwrap()), "1.2345");
        assert_eq!(format_total(parse_ether("12").unwrap()), "12.0000");
    }

    #[test]
    fn test_rejects_malformed_data() {
        assert!(matches!(
            DemoAccount::parse(r#"{"network":"x"}"#),
            Err(DemoError::Json(_))
        ));
    }
}

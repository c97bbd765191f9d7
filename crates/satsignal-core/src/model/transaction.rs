// ── Transaction sightings ──

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// A transaction affecting the wallet was observed on the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSeenEvent {
    pub transaction_id: String,
    /// Net effect on the wallet: positive when funds were received.
    pub amount: Amount,
    /// Confirmation depth (0 while unconfirmed).
    #[serde(default)]
    pub depth: u32,
    /// First time the wallet has seen this transaction.
    #[serde(default)]
    pub first_appearance_in_wallet: bool,
    #[serde(default)]
    pub coinbase: bool,
}

/// Transaction lookup link handled by the system's registered block explorer.
const LOOKUP_URI_PREFIX: &str = "blockchain:/tx/";

impl TransactionSeenEvent {
    /// Abbreviated transaction id for display (`a1b2c3d4…e5f6`).
    pub fn short_id(&self) -> String {
        let id = self.transaction_id.as_str();
        match (id.get(..8), id.get(id.len().saturating_sub(4)..)) {
            (Some(head), Some(tail)) if id.len() > 16 => format!("{head}…{tail}"),
            _ => id.to_owned(),
        }
    }

    /// `blockchain:/tx/<id>` link for opening the transaction in a block explorer.
    pub fn lookup_uri(&self) -> String {
        format!("{LOOKUP_URI_PREFIX}{}", self.transaction_id)
    }
}

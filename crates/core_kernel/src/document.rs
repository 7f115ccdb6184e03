//! Document references
//!
//! A `DocumentRef` is the typed linkage between the writes that make up one
//! business event: the stock movements and the posting of a sale share one
//! reference, the two legs of a cash transfer share one reference. It is
//! produced exactly once per event and threaded through every row written
//! in that event's transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of document types a reference can be issued for
///
/// Each type owns its own daily numbering sequence per tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Sale to a customer (stock out + debt posting)
    SalesInvoice,
    /// Purchase from a supplier (stock in + credit posting)
    PurchaseInvoice,
    /// Money or instruments collected from a counterparty
    Collection,
    /// Money or instruments paid to a counterparty
    Payment,
    /// Standalone cash income/expense voucher
    CashVoucher,
    /// Transfer between two cash accounts
    TransferVoucher,
}

impl DocumentType {
    /// Returns the reference-number prefix for this document type
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentType::SalesInvoice => "SLS",
            DocumentType::PurchaseInvoice => "PRC",
            DocumentType::Collection => "COL",
            DocumentType::Payment => "PAY",
            DocumentType::CashVoucher => "CSH",
            DocumentType::TransferVoucher => "TRF",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// A document reference: type plus the formatted reference number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub document_type: DocumentType,
    pub reference_no: String,
}

impl DocumentRef {
    /// Formats a reference from a reserved per-(type, date) sequence number
    ///
    /// The sequence must come from the store's atomic reserve-and-increment;
    /// the format is `{prefix}-{YYYYMMDD}-{seq:04}`.
    pub fn from_sequence(document_type: DocumentType, date: NaiveDate, sequence: u32) -> Self {
        Self {
            document_type,
            reference_no: format!(
                "{}-{}-{:04}",
                document_type.prefix(),
                date.format("%Y%m%d"),
                sequence
            ),
        }
    }

    /// Creates a reference from an externally supplied number
    pub fn external(document_type: DocumentType, reference_no: impl Into<String>) -> Self {
        Self {
            document_type,
            reference_no: reference_no.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference_no)
    }
}

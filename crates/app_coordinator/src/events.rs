//! Business events and their receipts
//!
//! Every discriminator here is a closed enumeration; there is no free-form
//! movement type, payment method or flow string anywhere in the core.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{
    CashAccountId, CashMovementId, CounterpartyId, DocumentRef, DocumentType, InstrumentId,
    Money, PostingId, ProductId, StockMovementId, TenantId,
};
use domain_inventory::StockDirection;
use domain_ledger::EntryDirection;

/// Caller-supplied token that makes a retried event commit at most once
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The canonical derivation from the event's document identity
    pub fn derived(tenant: TenantId, document_type: DocumentType, reference_no: &str) -> Self {
        Self(format!("{}/{}/{}", tenant, document_type.prefix(), reference_no))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which way a trade moves goods and debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    /// Goods out, counterparty owes the tenant
    Sale,
    /// Goods in, tenant owes the counterparty
    Purchase,
}

impl TradeDirection {
    pub fn document_type(&self) -> DocumentType {
        match self {
            TradeDirection::Sale => DocumentType::SalesInvoice,
            TradeDirection::Purchase => DocumentType::PurchaseInvoice,
        }
    }

    pub fn stock_direction(&self) -> StockDirection {
        match self {
            TradeDirection::Sale => StockDirection::Out,
            TradeDirection::Purchase => StockDirection::In,
        }
    }

    pub fn entry_direction(&self) -> EntryDirection {
        match self {
            TradeDirection::Sale => EntryDirection::Debt,
            TradeDirection::Purchase => EntryDirection::Credit,
        }
    }
}

/// One line of a trade event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    /// Quantity traded (always positive)
    pub quantity: Decimal,
    /// Price per unit
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: Decimal, unit_price: Money) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }

    /// Quantity times unit price, at the currency's scale
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A sale to a customer or a purchase from a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOrPurchase {
    pub counterparty_id: CounterpartyId,
    pub direction: TradeDirection,
    pub items: Vec<LineItem>,
    /// Payment terms, carried onto the posting
    pub due_date: Option<NaiveDate>,
    pub idempotency_key: IdempotencyKey,
}

/// What a committed trade wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// The one reference shared by the posting and every stock movement
    pub reference: DocumentRef,
    pub posting_id: PostingId,
    pub stock_movement_ids: Vec<StockMovementId>,
    pub total: Money,
}

/// Which way a settlement moves money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementFlow {
    /// Taken in from the counterparty; credits their account
    Collection,
    /// Paid out to the counterparty; debits their account
    Payment,
}

impl SettlementFlow {
    pub fn document_type(&self) -> DocumentType {
        match self {
            SettlementFlow::Collection => DocumentType::Collection,
            SettlementFlow::Payment => DocumentType::Payment,
        }
    }

    pub fn entry_direction(&self) -> EntryDirection {
        match self {
            SettlementFlow::Collection => EntryDirection::Credit,
            SettlementFlow::Payment => EntryDirection::Debt,
        }
    }
}

/// How a settlement is carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SettlementMethod {
    /// Cash against one of the tenant's accounts
    Cash { account_id: CashAccountId },
    /// Instruments from the portfolio, endorsed over whole
    EndorseInstruments { instrument_ids: Vec<InstrumentId> },
    /// A new check received from, or issued to, the counterparty
    NewInstrument {
        instrument_no: String,
        bank: String,
        due_date: NaiveDate,
    },
}

/// A collection from, or payment to, a counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOrPayment {
    pub counterparty_id: CounterpartyId,
    pub flow: SettlementFlow,
    pub amount: Money,
    pub method: SettlementMethod,
    pub idempotency_key: IdempotencyKey,
}

/// What a committed settlement wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub reference: DocumentRef,
    pub posting_id: PostingId,
    /// Instruments endorsed or created by this settlement
    pub instrument_ids: Vec<InstrumentId>,
    /// Cash movement, when the method was cash
    pub cash_movement_id: Option<CashMovementId>,
}

/// Which way a standalone cash voucher moves money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlow {
    Income,
    Expense,
}

/// A cash income or expense outside the counterparty ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashExpenseOrIncome {
    pub flow: CashFlow,
    /// Reporting category, explicit - the core never infers it from text
    pub category: String,
    pub amount: Money,
    /// Account to move; a movement without an account touches no balance
    pub account_id: Option<CashAccountId>,
    pub counterparty_id: Option<CounterpartyId>,
    pub idempotency_key: IdempotencyKey,
}

/// What a committed cash voucher wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashVoucherReceipt {
    pub reference: DocumentRef,
    pub movement_id: CashMovementId,
}

/// A transfer between two cash accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashTransfer {
    pub from_account: CashAccountId,
    pub to_account: CashAccountId,
    pub amount: Money,
    pub idempotency_key: IdempotencyKey,
}

/// What a committed transfer wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub reference: DocumentRef,
    pub outgoing: CashMovementId,
    pub incoming: CashMovementId,
}

/// The durable record behind an idempotency key
///
/// Written in the same transaction as the event's rows; a retry with the
/// same key replays this instead of posting again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommittedOutcome {
    Trade(TradeReceipt),
    Settlement(SettlementReceipt),
    CashVoucher(CashVoucherReceipt),
    Transfer(TransferReceipt),
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_total_rounds_at_currency_scale() {
        let item = LineItem::new(
            ProductId::new(),
            dec!(3),
            Money::new(dec!(19.99), Currency::TRY),
        );
        assert_eq!(item.line_total().amount(), dec!(59.97));
    }

    #[test]
    fn test_trade_direction_mappings() {
        assert_eq!(TradeDirection::Sale.document_type(), DocumentType::SalesInvoice);
        assert_eq!(TradeDirection::Sale.stock_direction(), StockDirection::Out);
        assert_eq!(TradeDirection::Sale.entry_direction(), EntryDirection::Debt);

        assert_eq!(TradeDirection::Purchase.document_type(), DocumentType::PurchaseInvoice);
        assert_eq!(TradeDirection::Purchase.stock_direction(), StockDirection::In);
        assert_eq!(TradeDirection::Purchase.entry_direction(), EntryDirection::Credit);
    }

    #[test]
    fn test_settlement_flow_mappings() {
        assert_eq!(SettlementFlow::Collection.entry_direction(), EntryDirection::Credit);
        assert_eq!(SettlementFlow::Payment.entry_direction(), EntryDirection::Debt);
    }

    #[test]
    fn test_idempotency_key_derivation() {
        let tenant = TenantId::new();
        let key = IdempotencyKey::derived(tenant, DocumentType::SalesInvoice, "SLS-20260805-0001");
        assert!(key.as_str().contains("SLS"));
        assert!(key.as_str().contains("SLS-20260805-0001"));
        assert_eq!(
            key,
            IdempotencyKey::derived(tenant, DocumentType::SalesInvoice, "SLS-20260805-0001")
        );
    }

    #[test]
    fn test_committed_outcome_serde_round_trip() {
        let receipt = CashVoucherReceipt {
            reference: DocumentRef::external(DocumentType::CashVoucher, "CSH-20260805-0001"),
            movement_id: CashMovementId::new(),
        };
        let outcome = CommittedOutcome::CashVoucher(receipt);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: CommittedOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}

//! The posting coordinator
//!
//! One public operation per business event. Each operation follows the same
//! shape: validate cheap things up front, begin the unit of work, replay if
//! the idempotency key already committed, reserve the document reference,
//! run the domain services against the transaction, journal the receipt,
//! commit. Any error on the way drops the unit of work, which discards
//! every buffered write.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use core_kernel::{CashMovementId, DocumentType, Money, TenantConfig};
use domain_cash::{CashError, CashMovement, CashStore};
use domain_instrument::{
    Instrument, InstrumentDirection, InstrumentError, InstrumentService, InstrumentStore,
};
use domain_inventory::{ensure_available, InventoryError, StockMovement, StockStore};
use domain_ledger::{AccountLedgerService, LedgerError};

use crate::error::CoordinatorError;
use crate::events::{
    CashExpenseOrIncome, CashFlow, CashTransfer, CashVoucherReceipt, CollectionOrPayment,
    CommittedOutcome, SaleOrPurchase, SettlementFlow, SettlementMethod, SettlementReceipt,
    TradeDirection, TradeReceipt, TransferReceipt,
};
use crate::numbering::next_reference;
use crate::store::{TransactionalStore, UnitOfWork};

/// Turns business events into atomic sets of postings and transitions
///
/// The coordinator is the only writer of postings, instrument transitions,
/// stock movements and cash movements; the domain services it drives are
/// read-and-validate helpers that run inside its transaction.
#[derive(Debug)]
pub struct PostingCoordinator<S: TransactionalStore> {
    store: S,
    config: TenantConfig,
    ledger: AccountLedgerService,
    instruments: InstrumentService,
}

impl<S: TransactionalStore> PostingCoordinator<S> {
    pub fn new(store: S, config: TenantConfig) -> Self {
        let ledger = AccountLedgerService::new(config.clone());
        let instruments = InstrumentService::new(config.clone());
        Self {
            store,
            config,
            ledger,
            instruments,
        }
    }

    pub fn config(&self) -> &TenantConfig {
        &self.config
    }

    /// Read access to the account ledger service, for the projection reads
    /// the consuming layer serves (statements, exposure)
    pub fn ledger(&self) -> &AccountLedgerService {
        &self.ledger
    }

    /// Read access to the instrument service (custody history, replay check)
    pub fn instruments(&self) -> &InstrumentService {
        &self.instruments
    }

    /// Opens a unit of work for the projection reads exposed above and for
    /// administrative writes (registering counterparties, cash accounts)
    pub async fn unit_of_work(&self) -> Result<S::Tx, CoordinatorError> {
        Ok(self.store.begin(self.config.tenant_id).await?)
    }

    /// Records a sale or purchase: the stock movements and exactly one
    /// posting, under one shared reference, committed together or not at all
    pub async fn record_sale_or_purchase(
        &self,
        event: SaleOrPurchase,
    ) -> Result<TradeReceipt, CoordinatorError> {
        if event.items.is_empty() {
            return Err(CoordinatorError::EmptyEvent);
        }
        let mut total = Money::zero(self.config.currency);
        for item in &event.items {
            item.unit_price.ensure_currency(self.config.currency)?;
            if item.quantity <= Decimal::ZERO {
                return Err(InventoryError::InvalidQuantity(item.quantity).into());
            }
            total = total + item.line_total();
        }
        if !total.is_positive() {
            return Err(LedgerError::InvalidAmount(total.amount()).into());
        }

        let now = Utc::now();
        let date = self.config.timezone.business_date(now);

        let mut tx = self.store.begin(self.config.tenant_id).await?;
        if let Some(outcome) = tx.committed_outcome(&event.idempotency_key).await? {
            tx.rollback().await?;
            return match outcome {
                CommittedOutcome::Trade(receipt) => {
                    info!(key = %event.idempotency_key, "trade already committed, replaying receipt");
                    Ok(receipt)
                }
                _ => Err(CoordinatorError::IdempotencyMismatch {
                    key: event.idempotency_key.to_string(),
                }),
            };
        }

        let reference = next_reference(&mut tx, event.direction.document_type(), date).await?;

        let mut stock_movement_ids = Vec::with_capacity(event.items.len());
        for item in &event.items {
            if event.direction == TradeDirection::Sale {
                let on_hand = tx.on_hand(item.product_id).await?;
                ensure_available(item.product_id, on_hand, item.quantity)?;
            }
            let movement = StockMovement::new(
                item.product_id,
                event.direction.stock_direction(),
                item.quantity,
                reference.clone(),
                now,
            );
            stock_movement_ids.push(movement.id);
            tx.insert_stock_movement(movement).await?;
        }

        let posting_id = self
            .ledger
            .post(
                &mut tx,
                event.counterparty_id,
                event.direction.entry_direction(),
                total,
                reference.clone(),
                event.due_date,
                now,
            )
            .await?;

        let receipt = TradeReceipt {
            reference,
            posting_id,
            stock_movement_ids,
            total,
        };
        tx.record_outcome(
            event.idempotency_key.clone(),
            CommittedOutcome::Trade(receipt.clone()),
        )
        .await?;
        tx.commit().await?;

        info!(
            reference = %receipt.reference,
            counterparty = %event.counterparty_id,
            total = %receipt.total,
            direction = ?event.direction,
            "trade committed"
        );
        Ok(receipt)
    }

    /// Records a collection or payment: the settlement legs (cash movement,
    /// endorsements, or a new instrument) and exactly one posting, as one unit
    pub async fn record_collection_or_payment(
        &self,
        event: CollectionOrPayment,
    ) -> Result<SettlementReceipt, CoordinatorError> {
        event.amount.ensure_currency(self.config.currency)?;
        if !event.amount.is_positive() {
            return Err(LedgerError::InvalidAmount(event.amount.amount()).into());
        }

        let now = Utc::now();
        let date = self.config.timezone.business_date(now);

        let mut tx = self.store.begin(self.config.tenant_id).await?;
        if let Some(outcome) = tx.committed_outcome(&event.idempotency_key).await? {
            tx.rollback().await?;
            return match outcome {
                CommittedOutcome::Settlement(receipt) => {
                    info!(key = %event.idempotency_key, "settlement already committed, replaying receipt");
                    Ok(receipt)
                }
                _ => Err(CoordinatorError::IdempotencyMismatch {
                    key: event.idempotency_key.to_string(),
                }),
            };
        }

        let reference = next_reference(&mut tx, event.flow.document_type(), date).await?;

        let mut instrument_ids = Vec::new();
        let mut cash_movement_id = None;

        match &event.method {
            SettlementMethod::Cash { account_id } => {
                let mut account = tx
                    .cash_account(*account_id)
                    .await?
                    .ok_or(CashError::UnknownAccount(*account_id))?;

                let movement = match event.flow {
                    SettlementFlow::Collection => {
                        CashMovement::income(Some(*account_id), event.amount, now)
                    }
                    SettlementFlow::Payment => {
                        CashMovement::expense(Some(*account_id), event.amount, now)
                    }
                }
                .with_counterparty(event.counterparty_id)
                .with_reference(reference.clone());

                account.apply(&movement);
                cash_movement_id = Some(movement.id);
                tx.insert_cash_movement(movement).await?;
                tx.update_cash_account(account).await?;
            }

            SettlementMethod::EndorseInstruments {
                instrument_ids: selected,
            } => {
                if selected.is_empty() {
                    return Err(CoordinatorError::EmptyEvent);
                }
                let mut seen = HashSet::new();
                for id in selected {
                    if !seen.insert(*id) {
                        return Err(CoordinatorError::DuplicateInstrument(*id));
                    }
                }

                // Instruments are atomic: the selection must cover the
                // event total exactly, checked before any endorsement.
                let mut sum = Money::zero(self.config.currency);
                for id in selected {
                    let instrument = tx
                        .instrument(*id)
                        .await?
                        .ok_or(InstrumentError::UnknownInstrument(*id))?;
                    sum = sum + instrument.amount;
                }
                if sum != event.amount {
                    return Err(InstrumentError::AmountMismatch {
                        required: event.amount.amount(),
                        selected: sum.amount(),
                    }
                    .into());
                }

                for id in selected {
                    self.instruments
                        .endorse(&mut tx, *id, event.counterparty_id, date, now)
                        .await?;
                    instrument_ids.push(*id);
                }
            }

            SettlementMethod::NewInstrument {
                instrument_no,
                bank,
                due_date,
            } => {
                let direction = match event.flow {
                    SettlementFlow::Collection => InstrumentDirection::Received,
                    SettlementFlow::Payment => InstrumentDirection::Issued,
                };
                let instrument = Instrument::new(
                    event.counterparty_id,
                    instrument_no.clone(),
                    bank.clone(),
                    event.amount,
                    *due_date,
                    direction,
                    now,
                );
                let id = self.instruments.register(&mut tx, instrument).await?;
                instrument_ids.push(id);
            }
        }

        let posting_id = self
            .ledger
            .post(
                &mut tx,
                event.counterparty_id,
                event.flow.entry_direction(),
                event.amount,
                reference.clone(),
                None,
                now,
            )
            .await?;

        let receipt = SettlementReceipt {
            reference,
            posting_id,
            instrument_ids,
            cash_movement_id,
        };
        tx.record_outcome(
            event.idempotency_key.clone(),
            CommittedOutcome::Settlement(receipt.clone()),
        )
        .await?;
        tx.commit().await?;

        info!(
            reference = %receipt.reference,
            counterparty = %event.counterparty_id,
            amount = %event.amount,
            flow = ?event.flow,
            "settlement committed"
        );
        Ok(receipt)
    }

    /// Records a cash income or expense; when an account is given, the
    /// movement and the account balance move in the same unit
    pub async fn record_cash_expense_or_income(
        &self,
        event: CashExpenseOrIncome,
    ) -> Result<CashMovementId, CoordinatorError> {
        event.amount.ensure_currency(self.config.currency)?;
        if !event.amount.is_positive() {
            return Err(CashError::InvalidAmount(event.amount.amount()).into());
        }

        let now = Utc::now();
        let date = self.config.timezone.business_date(now);

        let mut tx = self.store.begin(self.config.tenant_id).await?;
        if let Some(outcome) = tx.committed_outcome(&event.idempotency_key).await? {
            tx.rollback().await?;
            return match outcome {
                CommittedOutcome::CashVoucher(receipt) => {
                    info!(key = %event.idempotency_key, "cash voucher already committed, replaying receipt");
                    Ok(receipt.movement_id)
                }
                _ => Err(CoordinatorError::IdempotencyMismatch {
                    key: event.idempotency_key.to_string(),
                }),
            };
        }

        let reference = next_reference(&mut tx, DocumentType::CashVoucher, date).await?;

        let mut movement = match event.flow {
            CashFlow::Income => CashMovement::income(event.account_id, event.amount, now),
            CashFlow::Expense => CashMovement::expense(event.account_id, event.amount, now),
        }
        .with_category(event.category.clone())
        .with_reference(reference.clone());
        if let Some(counterparty_id) = event.counterparty_id {
            movement = movement.with_counterparty(counterparty_id);
        }
        let movement_id = movement.id;

        if let Some(account_id) = event.account_id {
            let mut account = tx
                .cash_account(account_id)
                .await?
                .ok_or(CashError::UnknownAccount(account_id))?;
            account.apply(&movement);
            tx.update_cash_account(account).await?;
        }
        tx.insert_cash_movement(movement).await?;

        tx.record_outcome(
            event.idempotency_key.clone(),
            CommittedOutcome::CashVoucher(CashVoucherReceipt {
                reference: reference.clone(),
                movement_id,
            }),
        )
        .await?;
        tx.commit().await?;

        info!(
            reference = %reference,
            amount = %event.amount,
            flow = ?event.flow,
            category = %event.category,
            "cash voucher committed"
        );
        Ok(movement_id)
    }

    /// Records a transfer between two cash accounts: both legs and both
    /// balance updates as one unit
    pub async fn record_cash_transfer(
        &self,
        event: CashTransfer,
    ) -> Result<TransferReceipt, CoordinatorError> {
        event.amount.ensure_currency(self.config.currency)?;
        if !event.amount.is_positive() {
            return Err(CashError::InvalidAmount(event.amount.amount()).into());
        }

        let now = Utc::now();
        let date = self.config.timezone.business_date(now);

        let mut tx = self.store.begin(self.config.tenant_id).await?;
        if let Some(outcome) = tx.committed_outcome(&event.idempotency_key).await? {
            tx.rollback().await?;
            return match outcome {
                CommittedOutcome::Transfer(receipt) => {
                    info!(key = %event.idempotency_key, "transfer already committed, replaying receipt");
                    Ok(receipt)
                }
                _ => Err(CoordinatorError::IdempotencyMismatch {
                    key: event.idempotency_key.to_string(),
                }),
            };
        }

        let mut source = tx
            .cash_account(event.from_account)
            .await?
            .ok_or(CashError::UnknownAccount(event.from_account))?;
        let mut target = tx
            .cash_account(event.to_account)
            .await?
            .ok_or(CashError::UnknownAccount(event.to_account))?;

        let reference = next_reference(&mut tx, DocumentType::TransferVoucher, date).await?;

        let (outgoing, incoming) = CashMovement::transfer_pair(
            event.from_account,
            event.to_account,
            event.amount,
            reference.clone(),
            now,
        )?;

        source.apply(&outgoing);
        target.apply(&incoming);
        if source.balance.is_negative() {
            warn!(
                account = %source.id,
                balance = %source.balance,
                "transfer drives source account negative"
            );
        }

        let receipt = TransferReceipt {
            reference,
            outgoing: outgoing.id,
            incoming: incoming.id,
        };
        tx.insert_cash_movement(outgoing).await?;
        tx.insert_cash_movement(incoming).await?;
        tx.update_cash_account(source).await?;
        tx.update_cash_account(target).await?;

        tx.record_outcome(
            event.idempotency_key.clone(),
            CommittedOutcome::Transfer(receipt.clone()),
        )
        .await?;
        tx.commit().await?;

        info!(
            reference = %receipt.reference,
            from = %event.from_account,
            to = %event.to_account,
            amount = %event.amount,
            "transfer committed"
        );
        Ok(receipt)
    }
}

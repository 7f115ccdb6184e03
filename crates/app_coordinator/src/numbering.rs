//! Document reference numbering
//!
//! References are strictly increasing per `(tenant, document_type, date)`
//! and collision-free under concurrent callers: the sequence comes from the
//! store's atomic reserve-and-increment inside the event's transaction,
//! and the formatted reference is handed to every row of the event.

use chrono::NaiveDate;

use core_kernel::{DocumentRef, DocumentType, StoreError};

use crate::store::UnitOfWork;

/// Reserves the next reference for a document type on a business date
pub async fn next_reference<U>(
    tx: &mut U,
    document_type: DocumentType,
    date: NaiveDate,
) -> Result<DocumentRef, StoreError>
where
    U: UnitOfWork,
{
    let sequence = tx.reserve_reference(document_type, date).await?;
    Ok(DocumentRef::from_sequence(document_type, date, sequence))
}

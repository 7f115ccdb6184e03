//! Tenant configuration
//!
//! Currency, decimal scale and timezone reach the core as an injected value,
//! never as process-global state.

use serde::{Deserialize, Serialize};

use crate::identifiers::TenantId;
use crate::money::Currency;
use crate::temporal::Timezone;

/// Per-tenant configuration injected into the services and the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant identity; keys every store access
    pub tenant_id: TenantId,
    /// Ledger currency; all postings, instruments and cash movements of the
    /// tenant carry this currency (the currency fixes the decimal scale)
    pub currency: Currency,
    /// Timezone used to derive document business dates
    pub timezone: Timezone,
}

impl TenantConfig {
    pub fn new(tenant_id: TenantId, currency: Currency) -> Self {
        Self {
            tenant_id,
            currency,
            timezone: Timezone::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }
}

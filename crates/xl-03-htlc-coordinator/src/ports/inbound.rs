//! # Inbound Ports (API)

use crate::domain::{
    CounterpartyHtlcRequest, HtlcError, HtlcStatus, OwnHtlcRequest, OwnHtlcResponse,
    TransactionReceipt, WithdrawCounterpartyRequest,
};
use async_trait::async_trait;

/// HTLC coordinator API - inbound port.
#[async_trait]
pub trait HtlcCoordinatorApi: Send + Sync {
    /// Deploy the logic contract and fund our own leg.
    async fn own_htlc(&self, request: OwnHtlcRequest) -> Result<OwnHtlcResponse, HtlcError>;

    /// On-chain status of the counterparty's leg.
    async fn counterparty_htlc(
        &self,
        request: CounterpartyHtlcRequest,
    ) -> Result<HtlcStatus, HtlcError>;

    /// Reveal the pre-image to the counterparty's HTLC.
    async fn withdraw_counterparty(
        &self,
        request: WithdrawCounterpartyRequest,
    ) -> Result<TransactionReceipt, HtlcError>;
}

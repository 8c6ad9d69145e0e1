//! Transactions service.

use async_trait::async_trait;
use bengkel::{cashier::Sale, money::Rupiah};
use mockall::automock;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError},
    domain::transactions::models::{NewTransaction, Transaction, TransactionPayload},
};

const LIST_KEYS: &[&str] = &["transactions"];
const ITEM_KEYS: &[&str] = &["transaction"];

#[derive(Debug, Clone)]
pub struct HttpTransactionsService {
    client: ApiClient,
}

impl HttpTransactionsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionsService for HttpTransactionsService {
    async fn record(&self, transaction: NewTransaction) -> Result<Transaction, ApiError> {
        let body = transaction.to_json()?;

        let payload: TransactionPayload = self
            .client
            .item(
                ApiRequest::post("/transactions").json(body),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await?;

        let recorded = Transaction::try_from(payload)?;

        info!(
            transaction = %recorded.id,
            total = %recorded.total,
            change = %recorded.change,
            "sale recorded"
        );

        Ok(recorded)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let payloads: Vec<TransactionPayload> = self
            .client
            .list(
                ApiRequest::get("/transactions"),
                Access::Authenticated,
                LIST_KEYS,
            )
            .await?;

        let transactions = payloads
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(transactions)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Record a settled counter sale.
    async fn record(&self, transaction: NewTransaction) -> Result<Transaction, ApiError>;

    /// Staff: recorded sales, newest first as the server orders them.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;
}

/// Settle `sale` against `tendered` and record it. Nothing is sent when the
/// sale is empty or the cash falls short.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when settlement fails locally, otherwise
/// whatever recording the sale returns.
pub async fn record_sale(
    service: &dyn TransactionsService,
    sale: Sale,
    tendered: Rupiah,
) -> Result<Transaction, ApiError> {
    let transaction = NewTransaction::settle(sale, tendered)?;

    service.record(transaction).await
}

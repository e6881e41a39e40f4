use api_types::{
    account::{Account, AccountNew, DepositNew},
    card::Card,
    transaction::{Transaction, TransactionNew},
};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

/// Failures surfaced by the domain client. `Transport` means no usable
/// response arrived; the other variants carry the server's own message so
/// the flows can display it verbatim. The client never retries.
#[derive(Debug)]
pub enum ClientError {
    NotFound(String),
    Invalid(String),
    Server(String),
    Transport(reqwest::Error),
}

/// FastAPI-style error envelope.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn account_create(
        &self,
        email: &str,
        name: &str,
    ) -> std::result::Result<Account, ClientError> {
        let body = AccountNew {
            email: email.to_string(),
            name: name.to_string(),
        };
        self.post("accounts", &body).await
    }

    pub async fn account_get(&self, id: i64) -> std::result::Result<Account, ClientError> {
        self.get(&format!("accounts/{id}")).await
    }

    /// The server computes the new balance; the returned snapshot is the
    /// post-deposit account.
    pub async fn deposit(
        &self,
        id: i64,
        amount_cents: i64,
    ) -> std::result::Result<Account, ClientError> {
        self.post(&format!("accounts/{id}/deposit"), &DepositNew { amount_cents })
            .await
    }

    pub async fn card_issue(&self, account_id: i64) -> std::result::Result<Card, ClientError> {
        self.post(&format!("accounts/{account_id}/cards"), &serde_json::json!({}))
            .await
    }

    pub async fn cards_list(&self, account_id: i64) -> std::result::Result<Vec<Card>, ClientError> {
        self.get(&format!("accounts/{account_id}/cards")).await
    }

    pub async fn transaction_create(
        &self,
        account_id: i64,
        transaction: &TransactionNew,
    ) -> std::result::Result<Transaction, ClientError> {
        self.post(&format!("accounts/{account_id}/transactions"), transaction)
            .await
    }

    /// Newest first, server-defined order.
    pub async fn transactions_list(
        &self,
        account_id: i64,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.get(&format!("accounts/{account_id}/transactions")).await
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid endpoint: {err}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let res = self
            .http
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ClientError> {
        tracing::debug!(path, "POST");
        let res = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.detail)
        .unwrap_or_else(|_| "unknown error".to_string());
    tracing::warn!(%status, body = %body, "request failed");
    Err(classify(status, body))
}

fn classify(status: StatusCode, body: String) -> ClientError {
    match status.as_u16() {
        404 => ClientError::NotFound(body),
        400 | 422 => ClientError::Invalid(body),
        _ => ClientError::Server(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, "missing".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, "bad".into()),
            ClientError::Invalid(_)
        ));
        assert!(matches!(
            classify(StatusCode::UNPROCESSABLE_ENTITY, "bad".into()),
            ClientError::Invalid(_)
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ClientError::Server(_)
        ));
    }
}

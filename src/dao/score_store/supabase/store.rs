use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, Method, Response, header};
use serde::de::DeserializeOwned;

use crate::{
    config::StoreConfig,
    dao::{
        models::{HighScoreEntity, NewHighScoreEntity},
        score_store::ScoreStore,
        storage::StorageResult,
    },
    state::game::GameName,
};

use super::error::{SupabaseDaoError, SupabaseResult};

const HIGH_SCORES_TABLE: &str = "high_scores";

/// Score store backed by the Supabase REST interface.
#[derive(Clone)]
pub struct SupabaseScoreStore {
    client: Client,
    base_url: Arc<str>,
    anon_key: Arc<str>,
    configured: bool,
}

impl SupabaseScoreStore {
    /// Build the HTTP client. No request is sent until the store is used.
    pub fn new(config: StoreConfig, timeout: Duration) -> SupabaseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SupabaseDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.url.trim_end_matches('/')),
            anon_key: Arc::<str>::from(config.anon_key),
            configured: config.configured,
        })
    }

    fn request(&self, method: Method, table: &str) -> SupabaseResult<reqwest::RequestBuilder> {
        if !self.configured {
            return Err(SupabaseDaoError::NotConfigured);
        }

        let url = format!("{}/rest/v1/{}", self.base_url, table);
        Ok(self
            .client
            .request(method, url)
            .header("apikey", self.anon_key.as_ref())
            .bearer_auth(self.anon_key.as_ref()))
    }

    async fn send(&self, builder: reqwest::RequestBuilder, table: &str) -> SupabaseResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| SupabaseDaoError::RequestSend {
                table: table.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SupabaseDaoError::RequestStatus {
                table: table.to_string(),
                status,
                body,
            })
        }
    }

    async fn decode<T>(response: Response, table: &str) -> SupabaseResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| SupabaseDaoError::DecodeResponse {
                table: table.to_string(),
                source,
            })
    }

    async fn insert(&self, score: NewHighScoreEntity) -> SupabaseResult<HighScoreEntity> {
        let builder = self
            .request(Method::POST, HIGH_SCORES_TABLE)?
            .header("Prefer", "return=representation")
            .json(&[score]);
        let response = self.send(builder, HIGH_SCORES_TABLE).await?;
        let rows: Vec<HighScoreEntity> = Self::decode(response, HIGH_SCORES_TABLE).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseDaoError::EmptyInsert {
                table: HIGH_SCORES_TABLE.to_string(),
            })
    }

    async fn select_top(&self, game: GameName, limit: u32) -> SupabaseResult<Vec<HighScoreEntity>> {
        let query = [
            ("select", "*".to_string()),
            ("game", format!("eq.{}", game.as_str())),
            ("order", "score.desc,created_at.asc".to_string()),
            ("limit", limit.to_string()),
        ];
        let builder = self.request(Method::GET, HIGH_SCORES_TABLE)?.query(&query);
        let response = self.send(builder, HIGH_SCORES_TABLE).await?;
        Self::decode(response, HIGH_SCORES_TABLE).await
    }

    async fn probe(&self) -> SupabaseResult<()> {
        let builder = self
            .request(Method::GET, HIGH_SCORES_TABLE)?
            .query(&[("select", "id"), ("limit", "1")])
            .header(header::ACCEPT, "application/json");
        self.send(builder, HIGH_SCORES_TABLE).await.map(|_| ())
    }
}

impl ScoreStore for SupabaseScoreStore {
    fn insert_score(
        &self,
        score: NewHighScoreEntity,
    ) -> BoxFuture<'static, StorageResult<HighScoreEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert(score).await.map_err(Into::into) })
    }

    fn top_scores(
        &self,
        game: GameName,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<HighScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.select_top(game, limit).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.probe().await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_config_never_reaches_the_network() {
        let store =
            SupabaseScoreStore::new(StoreConfig::placeholder(), Duration::from_secs(1)).unwrap();

        let err = store.health_check().await.unwrap_err();
        assert!(err.client_message().contains("not configured"));
    }

    #[test]
    fn base_url_is_trimmed() {
        let store = SupabaseScoreStore::new(
            StoreConfig::new("https://demo.supabase.co/", "key"),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(store.base_url.as_ref(), "https://demo.supabase.co");
    }
}

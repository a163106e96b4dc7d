//! Typed access to the JuBuddy backend.
//!
//! Every response is decoded at this boundary into `ApiResult<T>`: a 2xx
//! body parsed as `T`, or an [`ApiError`] carrying the server's `error`
//! message. Nothing is retried.

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::config::Config;
use crate::constants::*;
use crate::error::{ApiError, ApiResult};
use crate::funds::FundsChange;
use crate::models::*;

pub fn build_query_params(params: &[(&str, Option<String>)]) -> String {
    let query_parts: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", encode(key), encode(v))))
        .collect();

    if query_parts.is_empty() {
        String::new()
    } else {
        format!("?{}", query_parts.join("&"))
    }
}

/// Turns a status code and body into the typed result.
///
/// An empty 2xx body decodes as `{}` so that mutations answering with no
/// content still satisfy [`MessageResponse`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if (200..300).contains(&status) {
        let body = if body.trim().is_empty() { "{}" } else { body };
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| ERR_REQUEST_FAILED.to_string());

    Err(ApiError::Server { status, message })
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed to send: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::from)?;
        let result = decode_response(status, &body);
        if let Err(e) = &result {
            tracing::warn!("Request returned {}: {}", status, e);
        }
        result
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.config.url(path), build_query_params(params));
        tracing::debug!("GET {}", url);
        self.send(self.http.request(Method::GET, url)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.config.url(path);
        tracing::debug!("POST {}", url);
        self.send(self.http.request(Method::POST, url).json(body))
            .await
    }

    fn user_param(user_id: UserId) -> [(&'static str, Option<String>); 1] {
        [("user_id", Some(user_id.to_string()))]
    }

    // Auth

    pub async fn login(&self, payload: &LoginPayload) -> ApiResult<SessionUser> {
        let response: LoginResponse = self.post(LOGIN_PATH, payload).await?;
        Ok(response.user)
    }

    // Transactions

    pub async fn get_transactions(&self, user_id: UserId) -> ApiResult<Vec<Transaction>> {
        let response: TransactionsResponse =
            self.get(TRANSACTIONS_PATH, &Self::user_param(user_id)).await?;
        Ok(response.transactions)
    }

    pub async fn create_transaction(
        &self,
        payload: &CreateTransactionPayload,
    ) -> ApiResult<Transaction> {
        self.post(CREATE_TRANSACTION_PATH, payload).await
    }

    // Goals

    pub async fn get_goals(&self, user_id: UserId) -> ApiResult<Vec<Goal>> {
        let response: GoalsResponse = self.get(GOALS_PATH, &Self::user_param(user_id)).await?;
        Ok(response.goals)
    }

    pub async fn create_goal(&self, payload: &CreateGoalPayload) -> ApiResult<Goal> {
        self.post(CREATE_GOAL_PATH, payload).await
    }

    /// Sends an already validated funds change.
    pub async fn update_goal_funds(&self, goal_id: i64, change: &FundsChange) -> ApiResult<Goal> {
        self.post(GOAL_FUNDS_PATH, &change.payload(goal_id)).await
    }

    pub async fn update_goal_status(&self, payload: &UpdateGoalStatusPayload) -> ApiResult<Goal> {
        self.post(GOAL_STATUS_PATH, payload).await
    }

    // Virtual jar

    pub async fn get_jar_items(&self, user_id: UserId) -> ApiResult<Vec<JarItem>> {
        let response: JarResponse = self.get(JAR_PATH, &Self::user_param(user_id)).await?;
        Ok(response.items)
    }

    pub async fn create_jar_item(&self, payload: &CreateJarItemPayload) -> ApiResult<JarItem> {
        self.post(CREATE_JAR_ITEM_PATH, payload).await
    }

    pub async fn purchase_jar_item(&self, payload: &JarItemActionPayload) -> ApiResult<JarItem> {
        self.post(PURCHASE_JAR_ITEM_PATH, payload).await
    }

    pub async fn delete_jar_item(
        &self,
        payload: &JarItemActionPayload,
    ) -> ApiResult<MessageResponse> {
        self.post(DELETE_JAR_ITEM_PATH, payload).await
    }

    // Buddies

    pub async fn get_buddies(&self, user_id: UserId) -> ApiResult<Vec<Buddy>> {
        let response: BuddiesResponse = self.get(BUDDIES_PATH, &Self::user_param(user_id)).await?;
        Ok(response.buddies)
    }

    pub async fn get_invitations(&self, user_id: UserId) -> ApiResult<Vec<BuddyInvitation>> {
        let response: InvitationsResponse =
            self.get(INVITATIONS_PATH, &Self::user_param(user_id)).await?;
        Ok(response.invitations)
    }

    pub async fn accept_invitation(
        &self,
        payload: &InvitationActionPayload,
    ) -> ApiResult<MessageResponse> {
        self.post(ACCEPT_INVITATION_PATH, payload).await
    }

    pub async fn decline_invitation(
        &self,
        payload: &InvitationActionPayload,
    ) -> ApiResult<MessageResponse> {
        self.post(DECLINE_INVITATION_PATH, payload).await
    }

    pub async fn invite_buddy(&self, payload: &InviteBuddyPayload) -> ApiResult<MessageResponse> {
        self.post(INVITE_BUDDY_PATH, payload).await
    }

    pub async fn search_users(&self, user_id: UserId, term: &str) -> ApiResult<Vec<UserSummary>> {
        let params = [
            ("user_id", Some(user_id.to_string())),
            ("q", Some(term.trim().to_string()).filter(|t| !t.is_empty())),
        ];
        let response: UserSearchResponse = self.get(SEARCH_USERS_PATH, &params).await?;
        Ok(response.users)
    }

    // Accounts

    pub async fn get_accounts(&self, user_id: UserId) -> ApiResult<Vec<Account>> {
        let response: AccountsResponse =
            self.get(ACCOUNTS_PATH, &Self::user_param(user_id)).await?;
        Ok(response.accounts)
    }

    pub async fn get_active_account(&self, user_id: UserId) -> ApiResult<Option<i64>> {
        let response: ActiveAccountResponse = self
            .get(ACTIVE_ACCOUNT_PATH, &Self::user_param(user_id))
            .await?;
        Ok(response.account_id)
    }

    pub async fn set_active_account(
        &self,
        payload: &SetActiveAccountPayload,
    ) -> ApiResult<MessageResponse> {
        self.post(SET_ACTIVE_ACCOUNT_PATH, payload).await
    }

    pub async fn create_account(&self, payload: &CreateAccountPayload) -> ApiResult<Account> {
        self.post(CREATE_ACCOUNT_PATH, payload).await
    }

    pub async fn delete_account(
        &self,
        payload: &DeleteAccountPayload,
    ) -> ApiResult<MessageResponse> {
        self.post(DELETE_ACCOUNT_PATH, payload).await
    }
}

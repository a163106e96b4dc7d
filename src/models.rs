use std::fmt;

use serde::{Deserialize, Serialize};

pub type UserId = i64;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in user as returned by the login endpoint.
///
/// Only `id` and `username` are read by the client; any other profile fields
/// are kept so the record can be written back to storage unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(alias = "user_id", alias = "userID")]
    pub id: UserId,
    pub username: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUser,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Case-insensitive match against `income` / `expense`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("income") {
            Some(TransactionKind::Income)
        } else if value.eq_ignore_ascii_case("expense") {
            Some(TransactionKind::Expense)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    /// Raw wire value; use [`Transaction::kind`] to interpret it.
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::parse(&self.kind)
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == Some(TransactionKind::Expense)
    }

    pub fn is_income(&self) -> bool {
        self.kind() == Some(TransactionKind::Income)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionPayload {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
    Expired,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
            GoalStatus::Expired => "expired",
        }
    }

    /// Completed and cancelled goals live in the history view.
    pub fn is_history(&self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Cancelled)
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    #[serde(rename = "goalID")]
    pub goal_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "targetValue")]
    pub target_value: f64,
    #[serde(rename = "actualValue")]
    pub actual_value: f64,
    #[serde(rename = "targetDate")]
    pub target_date: String,
    pub status: GoalStatus,
    #[serde(default)]
    pub progress_percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalPayload {
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    #[serde(rename = "targetValue")]
    pub target_value: f64,
    #[serde(rename = "targetDate")]
    pub target_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateFundsPayload {
    pub goal_id: i64,
    pub mode: String,
    pub amount: f64,
    /// The clamped saved amount after applying `amount`.
    #[serde(rename = "actualValue")]
    pub actual_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateGoalStatusPayload {
    pub goal_id: i64,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub goals: Vec<Goal>,
}

// ---------------------------------------------------------------------------
// Virtual jar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JarStatus {
    OnHold,
    Purchased,
    Expired,
}

impl JarStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JarStatus::Purchased | JarStatus::Expired)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JarItem {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub status: JarStatus,
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub hold_until: Option<String>,
    #[serde(default)]
    pub is_expired: bool,
    /// Client-only priority flag sourced from local storage.
    #[serde(skip)]
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJarItemPayload {
    pub user_id: UserId,
    pub name: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JarItemActionPayload {
    pub user_id: UserId,
    pub item_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarResponse {
    pub items: Vec<JarItem>,
}

// ---------------------------------------------------------------------------
// Buddies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Buddy {
    #[serde(rename = "buddyID")]
    pub buddy_id: i64,
    #[serde(rename = "buddyName")]
    pub buddy_name: String,
    #[serde(rename = "connectionDate")]
    pub connection_date: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(rename = "monthlyIncome", default)]
    pub monthly_income: f64,
    #[serde(rename = "monthlyExpense", default)]
    pub monthly_expense: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuddyInvitation {
    pub request_id: i64,
    pub sender_name: String,
    pub sender_id: UserId,
    pub date_sent: String,
}

/// A user returned by the buddy search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationActionPayload {
    pub user_id: UserId,
    pub request_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteBuddyPayload {
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddiesResponse {
    pub buddies: Vec<Buddy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationsResponse {
    pub invitations: Vec<BuddyInvitation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResponse {
    pub users: Vec<UserSummary>,
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountType {
    Cash,
    #[serde(rename = "Credit Card", alias = "CreditCard")]
    CreditCard,
    #[serde(rename = "Bank Account", alias = "BankAccount")]
    BankAccount,
    #[serde(rename = "Digital Wallet", alias = "DigitalWallet")]
    DigitalWallet,
}

impl AccountType {
    pub fn all() -> &'static [AccountType] {
        &[
            AccountType::Cash,
            AccountType::CreditCard,
            AccountType::BankAccount,
            AccountType::DigitalWallet,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Cash => "Cash",
            AccountType::CreditCard => "Credit Card",
            AccountType::BankAccount => "Bank Account",
            AccountType::DigitalWallet => "Digital Wallet",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveAccountResponse {
    #[serde(rename = "accountID", default)]
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveAccountPayload {
    pub user_id: UserId,
    pub account_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountPayload {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountPayload {
    pub account_id: i64,
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Body of mutations that do not return a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// The `{ "error": "..." }` shape every failed request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

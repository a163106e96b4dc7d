// Client configuration
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_STORAGE_PREFIX: &str = "jubuddy";
pub const ENV_API_BASE: &str = "JUBUDDY_API_BASE";
pub const ENV_STORAGE_PREFIX: &str = "JUBUDDY_STORAGE_PREFIX";

// Local storage keys (prefixed with the configured storage prefix)
pub const SESSION_KEY: &str = "session";
pub const PINNED_JAR_ITEMS_KEY: &str = "pinned_jar_items";

// Backend endpoints
pub const LOGIN_PATH: &str = "/user/api/login/";
pub const TRANSACTIONS_PATH: &str = "/user/api/transactions/";
pub const CREATE_TRANSACTION_PATH: &str = "/user/api/transactions/create/";
pub const GOALS_PATH: &str = "/user/api/goals/";
pub const CREATE_GOAL_PATH: &str = "/user/api/goals/create/";
pub const GOAL_FUNDS_PATH: &str = "/user/api/goals/update-funds/";
pub const GOAL_STATUS_PATH: &str = "/user/api/goals/update-status/";
pub const JAR_PATH: &str = "/user/api/jar/";
pub const CREATE_JAR_ITEM_PATH: &str = "/user/api/jar/create/";
pub const PURCHASE_JAR_ITEM_PATH: &str = "/user/api/jar/purchase/";
pub const DELETE_JAR_ITEM_PATH: &str = "/user/api/jar/delete/";
pub const BUDDIES_PATH: &str = "/user/api/buddies/";
pub const INVITATIONS_PATH: &str = "/user/api/buddies/invitations/";
pub const ACCEPT_INVITATION_PATH: &str = "/user/api/buddies/accept/";
pub const DECLINE_INVITATION_PATH: &str = "/user/api/buddies/decline/";
pub const INVITE_BUDDY_PATH: &str = "/user/api/buddies/invite/";
pub const SEARCH_USERS_PATH: &str = "/user/api/users/search/";
pub const ACCOUNTS_PATH: &str = "/user/api/accounts/";
pub const ACTIVE_ACCOUNT_PATH: &str = "/user/api/accounts/get-active/";
pub const SET_ACTIVE_ACCOUNT_PATH: &str = "/user/api/accounts/set-active/";
pub const CREATE_ACCOUNT_PATH: &str = "/user/api/accounts/create/";
pub const DELETE_ACCOUNT_PATH: &str = "/user/api/accounts/delete/";

// Goals
pub const PINNED_GOALS_LIMIT: usize = 3;
pub const MAX_GOAL_NAME_LENGTH: usize = 100;

// Buddies
pub const MAX_USERNAME_LENGTH: usize = 50;

// Jar
pub const MAX_JAR_ITEM_NAME_LENGTH: usize = 100;

// Charts
pub const MONTH_BUCKET_SLOTS: usize = 31;
pub const RANGE_BUCKET_COUNT: usize = 13;
pub const CHART_HEADROOM: f64 = 1.1;
pub const CHART_WIDTH: f64 = 100.0;
pub const CHART_HEIGHT: f64 = 120.0;
pub const CHART_PADDING: f64 = 8.0;

// Dashboard
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

// Display
pub const CURRENCY_SYMBOL: &str = "₱";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Error messages
pub const ERR_REQUEST_FAILED: &str = "Request failed";

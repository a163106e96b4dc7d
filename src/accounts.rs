use crate::models::{Account, AccountType};

/// The active account: the one the server reports, else the first account.
pub fn resolve_active(accounts: &[Account], server_active: Option<i64>) -> Option<&Account> {
    server_active
        .and_then(|id| accounts.iter().find(|a| a.account_id == id))
        .or_else(|| accounts.first())
}

/// Account types the user can still create; each type is allowed once.
pub fn creatable_types(accounts: &[Account]) -> Vec<AccountType> {
    AccountType::all()
        .iter()
        .copied()
        .filter(|t| !accounts.iter().any(|a| a.account_type == *t))
        .collect()
}

/// The account to activate after `deleted` is removed.
///
/// `None` when the deleted account was not the active one, or nothing is left.
pub fn active_after_delete(accounts: &[Account], deleted: i64, active: Option<i64>) -> Option<i64> {
    if active != Some(deleted) {
        return None;
    }
    accounts
        .iter()
        .find(|a| a.account_id != deleted)
        .map(|a| a.account_id)
}

pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts.iter().map(|a| a.balance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, account_type: AccountType, balance: f64) -> Account {
        Account {
            account_id: id,
            account_type,
            balance,
        }
    }

    #[test]
    fn active_falls_back_to_first() {
        let accounts = vec![
            account(1, AccountType::Cash, 100.0),
            account(2, AccountType::BankAccount, 900.0),
        ];
        assert_eq!(resolve_active(&accounts, Some(2)).map(|a| a.account_id), Some(2));
        assert_eq!(resolve_active(&accounts, Some(7)).map(|a| a.account_id), Some(1));
        assert_eq!(resolve_active(&accounts, None).map(|a| a.account_id), Some(1));
        assert_eq!(resolve_active(&[], Some(1)), None);
    }

    #[test]
    fn one_account_per_type() {
        let accounts = vec![account(1, AccountType::Cash, 0.0)];
        assert_eq!(
            creatable_types(&accounts),
            vec![
                AccountType::CreditCard,
                AccountType::BankAccount,
                AccountType::DigitalWallet
            ]
        );
    }

    #[test]
    fn deleting_the_active_account() {
        let accounts = vec![
            account(1, AccountType::Cash, 0.0),
            account(2, AccountType::DigitalWallet, 0.0),
        ];
        assert_eq!(active_after_delete(&accounts, 1, Some(1)), Some(2));
        assert_eq!(active_after_delete(&accounts, 1, Some(2)), None);
        assert_eq!(active_after_delete(&accounts[..1], 1, Some(1)), None);
        assert_eq!(total_balance(&accounts), 0.0);
    }
}

use crate::constants::MAX_USERNAME_LENGTH;
use crate::error::ValidationError;
use crate::models::{Buddy, BuddyInvitation, UserSummary};

/// Drops an invitation once it has been accepted or declined.
///
/// Returns the removed invitation, if it was still pending.
pub fn remove_invitation(
    pending: &mut Vec<BuddyInvitation>,
    request_id: i64,
) -> Option<BuddyInvitation> {
    let index = pending.iter().position(|inv| inv.request_id == request_id)?;
    Some(pending.remove(index))
}

/// Users matching `term` by first name, last name or username.
pub fn search_candidates<'a>(users: &'a [UserSummary], term: &str) -> Vec<&'a UserSummary> {
    let needle = term.trim().to_lowercase();
    users
        .iter()
        .filter(|user| {
            needle.is_empty()
                || user.first_name.to_lowercase().contains(&needle)
                || user.last_name.to_lowercase().contains(&needle)
                || user.username.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn validate_invite(username: &str, self_username: &str) -> Result<String, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required("Username"));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Username",
            max: MAX_USERNAME_LENGTH,
        });
    }
    if username.eq_ignore_ascii_case(self_username.trim()) {
        return Err(ValidationError::Other(
            "Cannot send a buddy invite to yourself".to_string(),
        ));
    }
    Ok(username.to_string())
}

/// Monthly income minus expense for a buddy's shared progress panel.
pub fn monthly_net(buddy: &Buddy) -> f64 {
    buddy.monthly_income - buddy.monthly_expense
}

/// First letter of the buddy's name, for the avatar.
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(request_id: i64) -> BuddyInvitation {
        BuddyInvitation {
            request_id,
            sender_name: format!("sender {request_id}"),
            sender_id: request_id * 10,
            date_sent: "2024-03-01".to_string(),
        }
    }

    #[test]
    fn removing_invitations() {
        let mut pending = vec![invitation(1), invitation(2), invitation(3)];
        assert_eq!(remove_invitation(&mut pending, 2).map(|i| i.request_id), Some(2));
        assert_eq!(remove_invitation(&mut pending, 2), None);
        assert_eq!(
            pending.iter().map(|i| i.request_id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn candidate_search() {
        let users = vec![
            UserSummary {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                username: "janesmith".into(),
            },
            UserSummary {
                first_name: "Mike".into(),
                last_name: "Johnson".into(),
                username: "mikej".into(),
            },
        ];
        assert_eq!(search_candidates(&users, "").len(), 2);
        assert_eq!(search_candidates(&users, "JOHN")[0].username, "mikej");
        assert_eq!(search_candidates(&users, "smi")[0].username, "janesmith");
        assert!(search_candidates(&users, "zed").is_empty());
    }

    #[test]
    fn invite_validation() {
        assert_eq!(validate_invite(" mikej ", "jane"), Ok("mikej".to_string()));
        assert!(validate_invite("", "jane").is_err());
        assert!(validate_invite("Jane", "jane").is_err());
    }

    #[test]
    fn initials() {
        assert_eq!(initial("ana"), "A");
        assert_eq!(initial(""), "?");
    }
}

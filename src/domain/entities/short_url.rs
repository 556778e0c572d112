//! ShortUrl entity representing a code → original URL mapping.

use chrono::{DateTime, Utc};

/// The identity that created a record.
///
/// The database stores this as a nullable user id; the domain keeps it as an
/// explicit sum type so the anonymous branch in stats/toggle/delete is
/// visible at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Anonymous,
    User(String),
}

impl Owner {
    /// Maps the nullable `owner_id` column into the domain type.
    pub fn from_db(owner_id: Option<String>) -> Self {
        match owner_id {
            Some(id) => Owner::User(id),
            None => Owner::Anonymous,
        }
    }

    /// Maps back to the nullable column representation.
    pub fn as_db(&self) -> Option<&str> {
        match self {
            Owner::User(id) => Some(id),
            Owner::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Owner::Anonymous)
    }

    /// True when this owner is the given authenticated user.
    /// Anonymous never matches anyone.
    pub fn is_user(&self, user_id: &str) -> bool {
        matches!(self, Owner::User(id) if id == user_id)
    }
}

/// A shortened URL with its usage metadata.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrl {
    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if a redirect is currently allowed.
    pub fn is_redirectable(&self) -> bool {
        self.is_active && !self.is_expired()
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub code: String,
    pub original_url: String,
    pub owner: Owner,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ShortUrl {
        ShortUrl {
            id: 1,
            code: "abc1234".to_string(),
            original_url: "https://example.com".to_string(),
            owner: Owner::Anonymous,
            created_at: Utc::now(),
            last_accessed_at: None,
            click_count: 0,
            is_active,
            expires_at,
        }
    }

    #[test]
    fn test_owner_roundtrip() {
        assert_eq!(Owner::from_db(None), Owner::Anonymous);
        assert_eq!(
            Owner::from_db(Some("u1".to_string())),
            Owner::User("u1".to_string())
        );
        assert_eq!(Owner::Anonymous.as_db(), None);
        assert_eq!(Owner::User("u1".to_string()).as_db(), Some("u1"));
    }

    #[test]
    fn test_anonymous_matches_no_one() {
        assert!(!Owner::Anonymous.is_user("u1"));
        assert!(Owner::Anonymous.is_anonymous());
    }

    #[test]
    fn test_user_matches_only_itself() {
        let owner = Owner::User("u1".to_string());
        assert!(owner.is_user("u1"));
        assert!(!owner.is_user("u2"));
        assert!(!owner.is_anonymous());
    }

    #[test]
    fn test_unexpired_active_is_redirectable() {
        let url = sample(true, Some(Utc::now() + Duration::hours(1)));
        assert!(!url.is_expired());
        assert!(url.is_redirectable());
    }

    #[test]
    fn test_expired_is_not_redirectable() {
        let url = sample(true, Some(Utc::now() - Duration::seconds(1)));
        assert!(url.is_expired());
        assert!(!url.is_redirectable());
    }

    #[test]
    fn test_inactive_is_not_redirectable_even_if_unexpired() {
        let url = sample(false, None);
        assert!(!url.is_expired());
        assert!(!url.is_redirectable());
    }
}

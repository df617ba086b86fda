//! Records persisted by the store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/article`. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Body of `POST /api/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Loose email check: one '@' with a non-empty local part, a '.' somewhere
/// after it, and at least three characters following the '@'.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 {
        return false;
    }

    let mut at_index = None;
    let mut dot_after_at = false;

    for (i, c) in email.char_indices() {
        match c {
            '@' if at_index.is_some() => return false,
            '@' => at_index = Some(i),
            '.' if at_index.is_some() => dot_after_at = true,
            _ => {}
        }
    }

    match at_index {
        Some(at) => at > 0 && at + 3 < email.len() && dot_after_at,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("goat@farm.example"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@farm.io"));
        assert!(!is_valid_email("goat.farm.io"));
        assert!(!is_valid_email("goat@farm"));
        assert!(!is_valid_email("go@at@farm.io"));
        assert!(!is_valid_email("goat@b."));
    }

    #[test]
    fn test_new_article_defaults_missing_fields() {
        let article: NewArticle = serde_json::from_str(r#"{"title":"only"}"#).unwrap();
        assert_eq!(article.title, "only");
        assert!(article.content.is_empty());
    }
}

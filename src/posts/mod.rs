//! Post listing.
//!
//! The catalogue is fixed: two posts, authored by users 1 and 2. Each listing
//! request resolves author names through [`UserNameLookup`], one post at a time.

use serde::{Deserialize, Serialize};

use crate::users::{LookupResult, UserId, UserNameLookup};

/// A post as returned by `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    /// `None` only when the lookup policy reports missing names.
    pub author_name: Option<String>,
}

struct CatalogueEntry {
    id: i64,
    title: &'static str,
    author_id: UserId,
}

const CATALOGUE: [CatalogueEntry; 2] = [
    CatalogueEntry { id: 1, title: "Hello World", author_id: 1 },
    CatalogueEntry { id: 2, title: "Second Post", author_id: 2 },
];

/// Builds the post listing.
#[derive(Clone)]
pub struct PostListing {
    lookup: UserNameLookup,
}

impl PostListing {
    pub fn new(lookup: UserNameLookup) -> Self {
        Self { lookup }
    }

    /// Every post, annotated with its author's name.
    ///
    /// Fails only if the lookup policy propagates errors.
    pub async fn list(&self) -> LookupResult<Vec<PostRecord>> {
        let mut posts = Vec::with_capacity(CATALOGUE.len());
        for entry in &CATALOGUE {
            let author_name = self.lookup.user_name(entry.author_id).await?;
            posts.push(PostRecord {
                id: entry.id,
                title: entry.title.to_string(),
                author_name,
            });
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupConfig;
    use crate::lifecycle::Shutdown;
    use crate::resilience::FailurePolicy;
    use crate::users::{LookupError, UserDirectory, UserRecord, FALLBACK_NAME};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Knows user 1 only.
    struct OneUser;

    #[async_trait]
    impl UserDirectory for OneUser {
        async fn fetch_user(&self, id: UserId) -> LookupResult<UserRecord> {
            match id {
                1 => Ok(UserRecord { id, name: "Alice".into() }),
                _ => Err(LookupError::Status(404)),
            }
        }
    }

    fn listing(policy: FailurePolicy) -> PostListing {
        let config = LookupConfig {
            policy,
            delay_ms: 0,
            ..LookupConfig::default()
        };
        PostListing::new(UserNameLookup::new(Arc::new(OneUser), &config, Shutdown::new()))
    }

    #[tokio::test]
    async fn test_always_two_posts() {
        for policy in [FailurePolicy::ReturnNone, FailurePolicy::Fallback, FailurePolicy::Retry] {
            let posts = listing(policy).list().await.unwrap();
            let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
            assert_eq!(ids, vec![1, 2], "policy {}", policy);
            assert_eq!(posts[0].title, "Hello World");
            assert_eq!(posts[1].title, "Second Post");
            assert_eq!(posts[0].author_name.as_deref(), Some("Alice"));
        }
    }

    #[tokio::test]
    async fn test_missing_author_per_policy() {
        let posts = listing(FailurePolicy::Fallback).list().await.unwrap();
        assert_eq!(posts[1].author_name.as_deref(), Some(FALLBACK_NAME));

        let posts = listing(FailurePolicy::ReturnNone).list().await.unwrap();
        assert_eq!(posts[1].author_name, None);

        let err = listing(FailurePolicy::Propagate).list().await.unwrap_err();
        assert!(matches!(err, LookupError::Status(404)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let post = PostRecord {
            id: 1,
            title: "Hello World".into(),
            author_name: None,
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            serde_json::json!({ "id": 1, "title": "Hello World", "authorName": null })
        );
    }
}

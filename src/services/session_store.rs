//! # 로그인 세션 저장소
//!
//! 불투명한(opaque) 세션 토큰 → 사용자 id 매핑을 프로세스 메모리에 보관합니다.
//!
//! ## 라이프사이클
//! ```text
//! [서버 시작] SessionStore::new(ttl) → AppState에 Arc로 주입
//!     로그인: create_session()  → 토큰 발급 (쿠키로 전달)
//!     요청:   resolve_session() → 사용자 id 또는 None(401)
//!     로그아웃: remove_session()
//! [서버 종료] clear()
//! ```
//!
//! - 토큰은 OS 난수 생성기(`OsRng`)에서 뽑은 32바이트를 16진수로 인코딩한 값입니다.
//! - 맵의 키는 토큰 원문이 아니라 SHA-256 해시입니다.
//! - 각 세션은 `ttl`이 지나면 만료됩니다. 만료된 항목은 조회 시 제거되고,
//!   새 세션을 만들 때 한꺼번에 정리됩니다.
//! - 디스크에 저장하지 않으므로 재시작하면 모든 세션이 사라집니다.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// 토큰 원문 바이트 수 (16진수 문자열로는 64자)
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// 세션 토큰 → 사용자 id 저장소
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// 새 세션을 만들고 토큰 원문을 돌려줍니다.
    pub async fn create_session(&self, user_id: i64) -> String {
        let token = generate_token();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            hash_token(&token),
            SessionEntry {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        tracing::debug!(user_id, live = sessions.len(), "session created");

        token
    }

    /// 토큰에 해당하는 사용자 id. 발급된 적 없거나 만료된 토큰이면 `None`
    pub async fn resolve_session(&self, token: &str) -> Option<i64> {
        self.resolve_session_at(token, Utc::now()).await
    }

    /// `now` 시점을 기준으로 세션을 조회합니다. 만료된 항목은 지웁니다.
    pub(crate) async fn resolve_session_at(&self, token: &str, now: DateTime<Utc>) -> Option<i64> {
        let key = hash_token(token);

        {
            let sessions = self.sessions.read().await;
            match sessions.get(&key) {
                None => return None,
                Some(entry) if entry.expires_at > now => return Some(entry.user_id),
                Some(_) => {}
            }
        }

        // 읽기 잠금을 풀고 나서 쓰기 잠금으로 만료 항목 제거
        let mut sessions = self.sessions.write().await;
        if sessions.get(&key).is_some_and(|entry| entry.expires_at <= now) {
            sessions.remove(&key);
            tracing::debug!("expired session removed");
        }
        None
    }

    /// 로그아웃. 세션이 있었으면 `true`
    pub async fn remove_session(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .remove(&hash_token(token))
            .is_some()
    }

    /// 모든 세션을 지우고 지운 개수를 돌려줍니다. (서버 종료 시)
    pub async fn clear(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        count
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// 암호학적으로 안전한 난수로 세션 토큰을 만듭니다.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 토큰의 SHA-256 해시 (16진수)
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_session_resolves_to_user() {
        let store = SessionStore::new(Duration::hours(1));
        let token = store.create_session(42).await;

        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert_eq!(store.resolve_session(&token).await, Some(42));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let store = SessionStore::new(Duration::hours(1));
        store.create_session(1).await;

        assert_eq!(store.resolve_session("never-issued").await, None);
        assert_eq!(store.resolve_session("").await, None);
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let store = SessionStore::new(Duration::hours(1));
        let a = store.create_session(1).await;
        let b = store.create_session(1).await;

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn raw_token_is_not_stored() {
        let store = SessionStore::new(Duration::hours(1));
        let token = store.create_session(7).await;

        let sessions = store.sessions.read().await;
        assert!(!sessions.contains_key(&token));
        assert!(sessions.contains_key(&hash_token(&token)));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_removed() {
        let store = SessionStore::new(Duration::minutes(30));
        let token = store.create_session(3).await;

        let later = Utc::now() + Duration::minutes(31);
        assert_eq!(store.resolve_session_at(&token, later).await, None);
        assert!(store.is_empty().await);
        // 만료 후에는 현재 시각으로 조회해도 없습니다
        assert_eq!(store.resolve_session(&token).await, None);
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let store = SessionStore::new(Duration::hours(1));
        let a = store.create_session(1).await;
        let b = store.create_session(2).await;

        assert!(store.remove_session(&a).await);
        assert!(!store.remove_session(&a).await);
        assert_eq!(store.resolve_session(&a).await, None);
        assert_eq!(store.resolve_session(&b).await, Some(2));

        assert_eq!(store.clear().await, 1);
        assert_eq!(store.resolve_session(&b).await, None);
    }

    #[test]
    fn hash_is_stable_hex() {
        let hash = hash_token("token");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("token"));
        assert_ne!(hash, hash_token("other"));
    }
}

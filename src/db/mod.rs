//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 모든 쿼리는 `?` 플레이스홀더와 `.bind()`로 값을 전달합니다.
//! 사용자 입력이 SQL 텍스트에 직접 들어가는 경우는 없습니다.
//!
//! 각 하위 모듈:
//! - `answers`: 답변 조회/작성, 채택(accept)/채택 취소(reject)
//! - `comments`: 질문/답변 댓글
//! - `questions`: 질문 조회/작성 (태그 포함)
//! - `search`: 제목/본문, 작성자 이름, 태그 기준 검색
//! - `tags`: 태그 생성 및 질문-태그 관계
//! - `users`: 사용자 조회/생성/프로필 수정
//! - `votes`: 투표 토글과 투표 합계

pub mod answers;
pub mod comments;
pub mod questions;
pub mod search;
pub mod tags;
pub mod users;
pub mod votes;

pub use answers::*;
pub use comments::*;
pub use questions::*;
pub use search::*;
pub use tags::*;
pub use users::*;
pub use votes::*;

/// 테스트용 인메모리 SQLite 풀을 만들고 마이그레이션을 적용합니다.
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로
/// 연결을 하나로 고정하고, 그 연결이 닫히지 않도록 타임아웃을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `user`: 사용자(User)와 프로필 수정 요청
//! - `question`: 질문과 질문 작성 요청
//! - `answer`: 답변과 답변 작성 요청
//! - `comment`: 질문/답변 댓글
//! - `tag`: 태그
//! - `vote`: 투표 종류, 투표 대상, 투표 결과
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::Question`처럼 짧게 접근할 수 있습니다.

pub mod answer;
pub mod comment;
pub mod question;
pub mod tag;
pub mod user;
pub mod vote;

pub use answer::*;
pub use comment::*;
pub use question::*;
pub use tag::*;
pub use user::*;
pub use vote::*;

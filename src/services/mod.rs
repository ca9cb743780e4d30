//! # 서비스 모듈
//!
//! DB 밖에 있는 상태와 외부 연동을 담당합니다.
//! - `session_store`: 로그인 세션 저장소 (프로세스 메모리)
//! - `github`: GitHub OAuth 연동

pub mod github;
pub mod session_store;

pub use github::*;
pub use session_store::*;

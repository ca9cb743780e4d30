//! 요청 추출자(extractor) — 세션 쿠키 기반 인증

pub mod auth;

//! # 투표 모델 정의
//!
//! 투표는 (대상, 사용자) 쌍마다 최대 한 행만 존재합니다.
//! `vote_type`은 DB에 1(up) / 0(down)으로 저장됩니다.

use serde::{Deserialize, Serialize};

/// 찬성/반대
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// DB 저장값: up = 1, down = 0
    pub fn as_db(self) -> i64 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => 0,
        }
    }

    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            1 => Some(VoteType::Up),
            0 => Some(VoteType::Down),
            _ => None,
        }
    }
}

/// 투표 대상 (질문 또는 답변)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteSubject {
    Question,
    Answer,
}

impl VoteSubject {
    /// 투표 행이 저장되는 테이블
    pub fn table(self) -> &'static str {
        match self {
            VoteSubject::Question => "question_votes",
            VoteSubject::Answer => "answer_votes",
        }
    }

    /// 투표 테이블에서 대상 id를 담는 컬럼
    pub fn column(self) -> &'static str {
        match self {
            VoteSubject::Question => "question_id",
            VoteSubject::Answer => "answer_id",
        }
    }

    /// 대상 자체가 저장된 테이블
    pub fn subject_table(self) -> &'static str {
        match self {
            VoteSubject::Question => "questions",
            VoteSubject::Answer => "answers",
        }
    }
}

/// 토글 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    /// 새로 기록했거나 반대 방향으로 바꿈
    Recorded,
    /// 같은 방향을 다시 눌러 취소함
    Removed,
}

/// `POST /api/v1/{questions|answers}/{id}/vote` 요청 본문
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote_type: VoteType,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub outcome: Option<VoteOutcome>,
    pub vote_count: i64,
    pub my_vote: Option<VoteType>,
}

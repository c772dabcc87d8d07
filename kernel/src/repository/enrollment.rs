use crate::model::{
    enrollment::{
        event::{CreateEnrollment, DeleteEnrollment},
        Enrollment,
    },
    id::{EnrollmentId, EventId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    // 定員・重複・日程の衝突を検査したうえで参加登録する
    async fn create(&self, event: CreateEnrollment) -> AppResult<EnrollmentId>;
    // 参加登録を取り消す。登録がなければ何もしない
    async fn delete(&self, event: DeleteEnrollment) -> AppResult<()>;
    // ユーザー ID に紐づく参加登録を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Enrollment>>;
    // イベント ID に紐づく参加登録を取得する
    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Enrollment>>;
}

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    enrollment::{
        event::{CreateEnrollment, DeleteEnrollment},
        rule::{EnrollmentRule, EnrollmentTarget, HeldEnrollment},
        Enrollment,
    },
    id::{EnrollmentId, EventId, UserId},
};
use kernel::repository::enrollment::EnrollmentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{
        enrollment::EnrollmentRow,
        event::{EventCapacityRow, HeldScheduleRow},
    },
    ConnectionPool,
};

#[derive(new)]
pub struct EnrollmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryImpl {
    #[tracing::instrument(skip(self, event), fields(event_id = %event.event_id, user_id = %event.user_id))]
    async fn create(&self, event: CreateEnrollment) -> AppResult<EnrollmentId> {
        let mut tx = self.db.begin_serializable().await?;

        // 参加登録前のチェックとして、以下を調べる。
        // - 指定のイベントが存在するか
        // - すでに同じイベントに参加登録していないか
        // - 定員に空きがあるか
        // - 参加登録済みの他のイベントと時間帯が重ならないか
        {
            // ① イベントの存在確認と現在の参加者数
            let target: EnrollmentTarget = sqlx::query_as::<_, EventCapacityRow>(
                r#"
                    SELECT
                        e.event_id,
                        e.starts_at,
                        e.ends_at,
                        e.capacity,
                        (SELECT COUNT(*) FROM enrollments AS en
                            WHERE en.event_id = e.event_id) AS "enrolled_count"
                    FROM events AS e
                    WHERE e.event_id = $1
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(EnrollmentTarget::from)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("event ({}) not found", event.event_id))
            })?;

            // ② ユーザーの参加登録のうち、判定に関係するものだけを取得する
            //    同じイベントへの登録、もしくは時間帯が重なる登録：
            //        held.start < target.end AND target.start < held.end
            let held: Vec<HeldEnrollment> = sqlx::query_as::<_, HeldScheduleRow>(
                r#"
                    SELECT e.event_id, e.starts_at, e.ends_at
                    FROM enrollments AS en
                    INNER JOIN events AS e ON en.event_id = e.event_id
                    WHERE en.user_id = $1
                      AND (
                        e.event_id = $2
                        OR (e.starts_at < $4 AND $3 < e.ends_at)
                      )
                "#,
            )
            .bind(event.user_id)
            .bind(event.event_id)
            .bind(target.schedule.starts_at)
            .bind(target.schedule.ends_at)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(HeldEnrollment::from)
            .collect();

            // ③ 重複・定員・日程の順で判定する
            EnrollmentRule::check(&target, &held)?;
        }

        // ④ 参加登録の処理を行う
        let enrollment_id = EnrollmentId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO enrollments (enrollment_id, event_id, user_id, enrolled_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(enrollment_id)
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(event.enrolled_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::DuplicateEnrollment(format!(
                    "already enrolled in event ({})",
                    event.event_id
                ))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No enrollment record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(enrollment_id)
    }

    #[tracing::instrument(skip(self, event), fields(event_id = %event.event_id, user_id = %event.user_id))]
    async fn delete(&self, event: DeleteEnrollment) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (SELECT 1 FROM events WHERE event_id = $1)
            "#,
        )
        .bind(event.event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if !exists {
            return Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event.event_id
            )));
        }

        // 参加登録がなくてもエラーにはしない
        let res = sqlx::query(
            r#"
                DELETE FROM enrollments WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            tracing::debug!("no enrollment to cancel");
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, EnrollmentRow>(
            r#"
                SELECT
                    en.enrollment_id,
                    en.enrolled_at,
                    u.user_id,
                    u.name AS "user_name",
                    u.email,
                    e.event_id,
                    e.event_name,
                    e.starts_at,
                    e.ends_at,
                    e.venue,
                    e.room
                FROM enrollments AS en
                INNER JOIN users AS u ON en.user_id = u.user_id
                INNER JOIN events AS e ON en.event_id = e.event_id
                WHERE en.user_id = $1
                ORDER BY e.starts_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map(|rows| rows.into_iter().map(Enrollment::from).collect())
    }

    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, EnrollmentRow>(
            r#"
                SELECT
                    en.enrollment_id,
                    en.enrolled_at,
                    u.user_id,
                    u.name AS "user_name",
                    u.email,
                    e.event_id,
                    e.event_name,
                    e.starts_at,
                    e.ends_at,
                    e.venue,
                    e.room
                FROM enrollments AS en
                INNER JOIN users AS u ON en.user_id = u.user_id
                INNER JOIN events AS e ON en.event_id = e.event_id
                WHERE en.event_id = $1
                ORDER BY en.enrolled_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map(|rows| rows.into_iter().map(Enrollment::from).collect())
    }
}

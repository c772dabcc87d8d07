use crate::model::{id::EventId, schedule::Schedule};
use derive_new::new;
use shared::error::{AppError, AppResult};

// 参加登録のトランザクション内で読み取った、参加先のイベント
#[derive(Debug, new)]
pub struct EnrollmentTarget {
    pub event_id: EventId,
    pub schedule: Schedule,
    pub capacity: i32,
    pub enrolled_count: i64,
}

// ユーザーが参加登録済みのイベント
#[derive(Debug, Clone, new)]
pub struct HeldEnrollment {
    pub event_id: EventId,
    pub schedule: Schedule,
}

// 参加登録できるかどうかを判定する。I/O は行わない
pub struct EnrollmentRule;

impl EnrollmentRule {
    // 重複 → 定員 → 日程の衝突の順に判定する
    pub fn check(target: &EnrollmentTarget, held: &[HeldEnrollment]) -> AppResult<()> {
        if held.iter().any(|h| h.event_id == target.event_id) {
            return Err(AppError::DuplicateEnrollment(format!(
                "already enrolled in event ({})",
                target.event_id
            )));
        }

        if target.enrolled_count >= i64::from(target.capacity) {
            return Err(AppError::CapacityExceeded(format!(
                "event ({}) has reached its capacity of {}",
                target.event_id, target.capacity
            )));
        }

        if let Some(clash) = held
            .iter()
            .find(|h| h.schedule.overlaps(&target.schedule))
        {
            return Err(AppError::ScheduleConflict(format!(
                "event ({}) overlaps with enrolled event ({})",
                target.event_id, clash.event_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::tests::slot;

    fn target(schedule: Schedule, capacity: i32, enrolled_count: i64) -> EnrollmentTarget {
        EnrollmentTarget::new(EventId::new(), schedule, capacity, enrolled_count)
    }

    #[test]
    fn first_enrollment_in_an_empty_calendar_is_accepted() {
        let a = target(slot((10, 0), (11, 0)), 1, 0);
        assert!(EnrollmentRule::check(&a, &[]).is_ok());
    }

    // Event A (10:00-11:00, capacity 1) takes user X; X then tries B
    // (10:30-11:30) and a second user tries A.
    #[test]
    fn conflict_and_capacity_walkthrough() {
        let a = target(slot((10, 0), (11, 0)), 1, 0);
        assert!(EnrollmentRule::check(&a, &[]).is_ok());
        let x_holds = vec![HeldEnrollment::new(a.event_id, a.schedule)];

        let b = target(slot((10, 30), (11, 30)), 10, 0);
        assert!(matches!(
            EnrollmentRule::check(&b, &x_holds),
            Err(AppError::ScheduleConflict(_))
        ));

        let a_after_x = EnrollmentTarget::new(a.event_id, a.schedule, a.capacity, 1);
        assert!(matches!(
            EnrollmentRule::check(&a_after_x, &[]),
            Err(AppError::CapacityExceeded(_))
        ));
    }

    #[test]
    fn enrolling_twice_is_a_duplicate_not_a_conflict() {
        let a = target(slot((10, 0), (11, 0)), 5, 1);
        let held = vec![HeldEnrollment::new(a.event_id, a.schedule)];
        assert!(matches!(
            EnrollmentRule::check(&a, &held),
            Err(AppError::DuplicateEnrollment(_))
        ));
    }

    #[test]
    fn capacity_is_checked_before_conflicts() {
        let a = target(slot((10, 0), (11, 0)), 2, 2);
        let held = vec![HeldEnrollment::new(EventId::new(), slot((10, 0), (11, 0)))];
        assert!(matches!(
            EnrollmentRule::check(&a, &held),
            Err(AppError::CapacityExceeded(_))
        ));
    }

    #[test]
    fn back_to_back_events_are_allowed() {
        let held = vec![
            HeldEnrollment::new(EventId::new(), slot((9, 0), (10, 0))),
            HeldEnrollment::new(EventId::new(), slot((11, 0), (12, 0))),
        ];
        let a = target(slot((10, 0), (11, 0)), 3, 2);
        assert!(EnrollmentRule::check(&a, &held).is_ok());
    }
}

use crate::model::{id::UserId, role::Role, user::User};
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ViewEvents,
    Enroll,
    Unenroll,
    CreateEvent,
    // organizer_id が主催するイベントの更新・削除・参加者一覧の閲覧
    ManageEvent { organizer_id: UserId },
    ManageUsers,
    DeleteOrganizer,
}

impl Role {
    pub fn permits(&self, actor: UserId, operation: Operation) -> bool {
        match (self, operation) {
            (Role::Admin, _) => true,
            (_, Operation::ViewEvents | Operation::Enroll | Operation::Unenroll) => true,
            (Role::Organizer, Operation::CreateEvent) => true,
            (Role::Organizer, Operation::ManageEvent { organizer_id }) => organizer_id == actor,
            _ => false,
        }
    }
}

impl User {
    pub fn authorize(&self, operation: Operation) -> AppResult<()> {
        if self.role.permits(self.user_id, operation) {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }
}

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, DeleteOrganizer, UpdateUserPassword, UpdateUserRole},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::user::{UserCredentialRow, UserRow},
    ConnectionPool,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role
                FROM users
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    #[tracing::instrument(skip(self, event), fields(email = %event.email))]
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        if self.find_by_email(&event.email).await?.is_some() {
            return Err(AppError::EmailAlreadyRegistered(
                "Email already registered".into(),
            ));
        }

        let user_id = UserId::new();
        let hashed_password = hash_password(&event.password)?;
        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(hashed_password)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| {
            // 同時に同じメールアドレスで登録された場合は UNIQUE 制約で弾かれる
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::EmailAlreadyRegistered("Email already registered".into())
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role: event.role,
        })
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users WHERE user_id = $1;
            "#,
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

        // 現在のパスワードが正しいか検証する
        verify_password(&event.current_password, &original.password_hash)?;

        let new_password_hash = hash_password(&event.new_password)?;
        sqlx::query(
            r#"
                UPDATE users SET password_hash = $2 WHERE user_id = $1;
            "#,
        )
        .bind(event.user_id)
        .bind(new_password_hash)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    #[tracing::instrument(skip(self, event), fields(user_id = %event.user_id, role = event.role.as_ref()))]
    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users SET role = $2 WHERE user_id = $1;
            "#,
        )
        .bind(event.user_id)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified user not found".into()));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, event), fields(organizer_id = %event.organizer_id))]
    async fn delete_organizer(&self, event: DeleteOrganizer) -> AppResult<()> {
        // role を条件に含めることで、主催者以外のユーザーは削除されない
        let res = sqlx::query(
            r#"
                DELETE FROM users WHERE user_id = $1 AND role = $2;
            "#,
        )
        .bind(event.organizer_id)
        .bind(Role::Organizer.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "organizer ({}) not found",
                event.organizer_id
            )));
        }

        Ok(())
    }
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = bcrypt::verify(password, hash)?;
    if !valid {
        return Err(AppError::UnauthenticatedError);
    }
    Ok(())
}

use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUserPassword, UpdateUserRole},
        EnrolledUser, EventOrganizer, User,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Admin,
    #[serde(alias = "event_organizer")]
    Organizer,
    #[serde(alias = "participant")]
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Organizer => Self::Organizer,
            Role::User => Self::User,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Organizer => Self::Organizer,
            RoleName::User => Self::User,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: RoleName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
            role,
        } = value;
        Self {
            user_id,
            user_name,
            email,
            role: RoleName::from(role),
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 1))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateUserPasswordRequestWithUserId(UserId, UpdateUserPasswordRequest);
impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(
            user_id,
            UpdateUserPasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        UpdateUserPassword {
            user_id,
            current_password,
            new_password,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[garde(length(min = 1))]
    user_name: String,
    #[garde(email)]
    email: String,
    #[garde(length(min = 1))]
    password: String,
    // 省略時は一般ユーザーとして登録する
    #[garde(skip)]
    #[serde(default = "default_signup_role")]
    role: RoleName,
}

fn default_signup_role() -> RoleName {
    RoleName::User
}

impl SignupRequest {
    pub fn role(&self) -> RoleName {
        self.role
    }
}

impl From<SignupRequest> for CreateUser {
    fn from(value: SignupRequest) -> Self {
        let SignupRequest {
            user_name,
            email,
            password,
            role,
        } = value;
        Self {
            user_name,
            email,
            password,
            role: Role::from(role),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    role: RoleName,
}

#[derive(new)]
pub struct UpdateUserRoleRequestWithUserId(UserId, UpdateUserRoleRequest);
impl From<UpdateUserRoleRequestWithUserId> for UpdateUserRole {
    fn from(value: UpdateUserRoleRequestWithUserId) -> Self {
        let UpdateUserRoleRequestWithUserId(user_id, UpdateUserRoleRequest { role }) = value;
        Self {
            user_id,
            role: Role::from(role),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOrganizerResponse {
    pub organizer_id: UserId,
    pub organizer_name: String,
}

impl From<EventOrganizer> for EventOrganizerResponse {
    fn from(value: EventOrganizer) -> Self {
        let EventOrganizer {
            organizer_id,
            organizer_name,
        } = value;
        Self {
            organizer_id,
            organizer_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledUserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<EnrolledUser> for EnrolledUserResponse {
    fn from(value: EnrolledUser) -> Self {
        let EnrolledUser {
            user_id,
            user_name,
            email,
        } = value;
        Self {
            user_id,
            user_name,
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_role_names_are_accepted() -> anyhow::Result<()> {
        let req: UpdateUserRoleRequest = serde_json::from_str(r#"{"role":"event_organizer"}"#)?;
        assert_eq!(req.role, RoleName::Organizer);
        let req: UpdateUserRoleRequest = serde_json::from_str(r#"{"role":"participant"}"#)?;
        assert_eq!(req.role, RoleName::User);
        Ok(())
    }

    #[test]
    fn signup_defaults_to_the_user_role() -> anyhow::Result<()> {
        let req: SignupRequest = serde_json::from_str(
            r#"{"userName":"Alice","email":"alice@example.com","password":"pw"}"#,
        )?;
        assert!(req.validate(&()).is_ok());
        assert_eq!(req.role(), RoleName::User);
        Ok(())
    }

    #[test]
    fn signup_rejects_a_malformed_email() -> anyhow::Result<()> {
        let req: SignupRequest = serde_json::from_str(
            r#"{"userName":"Alice","email":"not-an-email","password":"pw"}"#,
        )?;
        assert!(req.validate(&()).is_err());
        Ok(())
    }
}

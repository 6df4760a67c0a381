//! Account operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    EngineError, NewUser, ResultEngine,
    users::{self, Role, User},
};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Create an account. The very first account in the store becomes the
    /// administrator; everyone after that is a regular user.
    pub async fn register_user(&self, cmd: NewUser) -> ResultEngine<User> {
        let name = normalize_required_name(&cmd.name, "name")?;
        let email = normalize_required_name(&cmd.email, "email")?;

        if users::Entity::find()
            .filter(users::Column::Email.eq(email.clone()))
            .one(self.db())
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(email));
        }

        let count = users::Entity::find().count(self.db()).await?;
        let role = if count == 0 { Role::Admin } else { Role::User };

        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: cmd.password_hash,
            role,
        };
        users::ActiveModel::from(&user).insert(self.db()).await?;

        Ok(user)
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db())
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn user_by_id(&self, id: Uuid) -> ResultEngine<Option<User>> {
        users::Entity::find_by_id(id.to_string())
            .one(self.db())
            .await?
            .map(User::try_from)
            .transpose()
    }

    /// All accounts, ascending by name. Role gating is the HTTP layer's job.
    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .order_by_asc(users::Column::Name)
            .all(self.db())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}

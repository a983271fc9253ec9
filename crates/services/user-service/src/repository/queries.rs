//! User queries shared by the pooled and the session-bound repositories.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, User, UserChanges};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::AccountDefaults;

/// Classify a failed write, naming the email on a uniqueness violation.
fn write_error(err: DbErr, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
            AppError::duplicate_email(email)
        }
        _ => AppError::from(err),
    }
}

pub(crate) async fn find_by_id<C>(db: &C, id: Uuid) -> AppResult<Option<User>>
where
    C: ConnectionTrait,
{
    let result = UserEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn find_by_email<C>(db: &C, email: &str) -> AppResult<Option<User>>
where
    C: ConnectionTrait,
{
    let result = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn list<C>(db: &C) -> AppResult<Vec<User>>
where
    C: ConnectionTrait,
{
    let models = UserEntity::find()
        .order_by_asc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(models.into_iter().map(User::from).collect())
}

pub(crate) async fn create<C>(
    db: &C,
    new_user: NewUser,
    defaults: AccountDefaults,
) -> AppResult<User>
where
    C: ConnectionTrait,
{
    let NewUser {
        email,
        password,
        first_name,
        last_name,
        id,
        api_key,
    } = new_user;

    let mut active_model = ActiveModel::new();
    if let Some(id) = id {
        active_model.id = Set(id);
    }
    if let Some(api_key) = api_key {
        active_model.api_key = Set(api_key);
    }
    if defaults.stamp_disabled_at_on_create {
        if let ActiveValue::Set(created_at) = active_model.created_at {
            active_model.disabled_at = Set(Some(created_at));
        }
    }
    active_model.email = Set(email.clone());
    active_model.password = Set(password);
    active_model.first_name = Set(first_name);
    active_model.last_name = Set(last_name);

    let model = active_model
        .insert(db)
        .await
        .map_err(|e| write_error(e, &email))?;

    tracing::info!(user_id = %model.id, "User created");
    Ok(User::from(model))
}

pub(crate) async fn update<C>(db: &C, id: Uuid, changes: UserChanges) -> AppResult<User>
where
    C: ConnectionTrait,
{
    let model = UserEntity::find_by_id(id).one(db).await?.ok_or_not_found()?;

    let mut active: ActiveModel = model.into();

    if let Some(first_name) = changes.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = changes.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(password) = changes.password {
        active.password = Set(password);
    }

    // last_updated_at is refreshed by the entity's before_save hook
    let model = active.update(db).await.map_err(AppError::from)?;
    Ok(User::from(model))
}

/// Set or clear `disabled_at`. Disabling an already disabled account keeps
/// its original timestamp.
pub(crate) async fn set_disabled<C>(
    db: &C,
    id: Uuid,
    disabled_at: Option<DateTime<Utc>>,
) -> AppResult<User>
where
    C: ConnectionTrait,
{
    let model = UserEntity::find_by_id(id).one(db).await?.ok_or_not_found()?;

    if disabled_at.is_some() == model.disabled_at.is_some() {
        return Ok(User::from(model));
    }

    let mut active: ActiveModel = model.into();
    active.disabled_at = Set(disabled_at);

    let model = active.update(db).await.map_err(AppError::from)?;
    tracing::info!(
        user_id = %model.id,
        disabled = model.disabled_at.is_some(),
        "User state changed"
    );
    Ok(User::from(model))
}

pub(crate) async fn delete<C>(db: &C, id: Uuid) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let result = UserEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok(())
}

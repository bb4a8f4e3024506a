//! Caller resolution shared by use cases that need more than the token's user id.

use pokedex_auth_types::caller::Caller;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::PokedexError;

/// Load the caller's account. A token for a deleted or deactivated account is `InvalidToken`.
pub async fn load_caller<U: UserRepository>(
    users: &U,
    caller: Caller,
) -> Result<User, PokedexError> {
    match users.find_by_id(caller.user_id).await? {
        Some(user) if user.is_active => Ok(user),
        _ => Err(PokedexError::InvalidToken),
    }
}

/// Load the caller and require staff privileges.
pub async fn require_staff<U: UserRepository>(
    users: &U,
    caller: Caller,
) -> Result<User, PokedexError> {
    let user = load_caller(users, caller).await?;
    if !user.is_staff {
        tracing::debug!(user_id = user.id, "staff-only operation refused");
        return Err(PokedexError::Forbidden);
    }
    Ok(user)
}

use pokedex_auth_types::caller::Caller;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, UserChanges};
use crate::error::PokedexError;
use crate::usecase::access::{load_caller, require_staff};
use crate::usecase::{
    hash_secret, optional_secret, optional_text, required_secret, required_text,
};

fn check_email(email: &str) -> Result<(), PokedexError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(PokedexError::InvalidData("invalid email".to_owned())),
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_staff: bool,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    /// Self-registration. Only a staff caller may create another staff account.
    pub async fn execute(
        &self,
        caller: Option<Caller>,
        input: CreateUserInput,
    ) -> Result<User, PokedexError> {
        let name = required_text(input.name)?;
        let login = required_text(input.login)?;
        let email = required_text(input.email)?;
        let password = required_secret(input.password)?;
        check_email(&email)?;

        if input.is_staff {
            let caller = caller.ok_or(PokedexError::Forbidden)?;
            require_staff(&self.repo, caller).await?;
        }

        if self
            .repo
            .is_taken(Some(&login), Some(&email), None)
            .await?
        {
            return Err(PokedexError::UserAlreadyExists);
        }

        let password_hash = hash_secret(password).await?;
        let user = self
            .repo
            .create(NewUser {
                name,
                login,
                email,
                password_hash,
                is_staff: input.is_staff,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<User, PokedexError> {
        load_caller(&self.repo, caller).await?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PokedexError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    /// An anonymous caller is only let through when the directory is public.
    pub async fn execute(&self, caller: Option<Caller>) -> Result<Vec<User>, PokedexError> {
        if let Some(caller) = caller {
            load_caller(&self.repo, caller).await?;
        }
        self.repo.list().await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    /// `full` is a PUT: name, login and email must all be present.
    pub async fn execute(
        &self,
        caller: Caller,
        id: i32,
        input: UpdateUserInput,
        full: bool,
    ) -> Result<User, PokedexError> {
        let actor = load_caller(&self.repo, caller).await?;
        if actor.id != id && !actor.is_staff {
            return Err(PokedexError::Forbidden);
        }
        let target = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PokedexError::UserNotFound)?;

        let flags_changed = input.is_staff.is_some_and(|v| v != target.is_staff)
            || input.is_active.is_some_and(|v| v != target.is_active);
        if flags_changed && !actor.is_staff {
            return Err(PokedexError::Forbidden);
        }

        let (name, login, email) = if full {
            (
                Some(required_text(input.name)?),
                Some(required_text(input.login)?),
                Some(required_text(input.email)?),
            )
        } else {
            (
                optional_text(input.name)?,
                optional_text(input.login)?,
                optional_text(input.email)?,
            )
        };
        if let Some(ref email) = email {
            check_email(email)?;
        }

        if (login.is_some() || email.is_some())
            && self
                .repo
                .is_taken(login.as_deref(), email.as_deref(), Some(id))
                .await?
        {
            return Err(PokedexError::UserAlreadyExists);
        }

        let password_hash = match optional_secret(input.password)? {
            Some(password) => Some(hash_secret(password).await?),
            None => None,
        };

        self.repo
            .update(
                id,
                UserChanges {
                    name,
                    login,
                    email,
                    password_hash,
                    is_active: input.is_active,
                    is_staff: input.is_staff,
                },
            )
            .await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<(), PokedexError> {
        let actor = load_caller(&self.repo, caller).await?;
        if actor.id != id && !actor.is_staff {
            return Err(PokedexError::Forbidden);
        }
        if !self.repo.delete(id).await? {
            return Err(PokedexError::UserNotFound);
        }
        tracing::info!(user_id = id, deleted_by = actor.id, "user deleted");
        Ok(())
    }
}

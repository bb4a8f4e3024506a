use pokedex_auth_types::caller::Caller;

use crate::domain::repository::{TypeRepository, UserRepository};
use crate::domain::types::TypeDescriptor;
use crate::error::PokedexError;
use crate::usecase::access::{load_caller, require_staff};
use crate::usecase::{optional_text, required_text};

// ── ListTypeDescriptors ──────────────────────────────────────────────────────

pub struct ListTypeDescriptorsUseCase<R: TypeRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: TypeRepository, U: UserRepository> ListTypeDescriptorsUseCase<R, U> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<TypeDescriptor>, PokedexError> {
        load_caller(&self.users, caller).await?;
        self.repo.list().await
    }
}

// ── GetTypeDescriptor ────────────────────────────────────────────────────────

pub struct GetTypeDescriptorUseCase<R: TypeRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: TypeRepository, U: UserRepository> GetTypeDescriptorUseCase<R, U> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<TypeDescriptor, PokedexError> {
        load_caller(&self.users, caller).await?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PokedexError::TypeNotFound)
    }
}

// ── CreateTypeDescriptor ─────────────────────────────────────────────────────

pub struct CreateTypeDescriptorUseCase<R: TypeRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: TypeRepository, U: UserRepository> CreateTypeDescriptorUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Caller,
        label: Option<String>,
    ) -> Result<TypeDescriptor, PokedexError> {
        require_staff(&self.users, caller).await?;
        let label = required_text(label)?;
        if self.repo.find_by_label(&label).await?.is_some() {
            return Err(PokedexError::TypeAlreadyExists);
        }
        self.repo.create(&label).await
    }
}

// ── UpdateTypeDescriptor ─────────────────────────────────────────────────────

pub struct UpdateTypeDescriptorUseCase<R: TypeRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: TypeRepository, U: UserRepository> UpdateTypeDescriptorUseCase<R, U> {
    /// `full` is a PUT and requires `label`; a PATCH without it is a no-op.
    pub async fn execute(
        &self,
        caller: Caller,
        id: i32,
        label: Option<String>,
        full: bool,
    ) -> Result<TypeDescriptor, PokedexError> {
        require_staff(&self.users, caller).await?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PokedexError::TypeNotFound)?;

        let label = if full {
            required_text(label)?
        } else {
            match optional_text(label)? {
                Some(label) => label,
                None => return Ok(current),
            }
        };

        if let Some(existing) = self.repo.find_by_label(&label).await? {
            if existing.id != id {
                return Err(PokedexError::TypeAlreadyExists);
            }
        }
        self.repo.update(id, &label).await
    }
}

// ── DeleteTypeDescriptor ─────────────────────────────────────────────────────

pub struct DeleteTypeDescriptorUseCase<R: TypeRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: TypeRepository, U: UserRepository> DeleteTypeDescriptorUseCase<R, U> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<(), PokedexError> {
        require_staff(&self.users, caller).await?;
        if !self.repo.delete(id).await? {
            return Err(PokedexError::TypeNotFound);
        }
        Ok(())
    }
}

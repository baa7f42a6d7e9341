//! Reducer logic for the user profile store.

use crate::types::{UserAction, UserState};
use freshcart_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Environment for the profile reducer
///
/// Auth itself is an external collaborator; the store only records its
/// outcomes, so no dependencies are injected.
#[derive(Clone, Debug, Default)]
pub struct ProfileEnvironment;

impl ProfileEnvironment {
    /// Creates a new `ProfileEnvironment`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Reducer for the user profile store
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileReducer;

impl ProfileReducer {
    /// Creates a new `ProfileReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ProfileReducer {
    type State = UserState;
    type Action = UserAction;
    type Environment = ProfileEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            UserAction::Login { user } => {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            },

            UserAction::Logout => {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            },

            UserAction::UpdateProfile { update } => {
                if let Some(user) = state.user.as_mut() {
                    if let Some(name) = update.name {
                        user.name = name;
                    }
                    if let Some(email) = update.email {
                        user.email = email;
                    }
                    if let Some(phone) = update.phone {
                        user.phone = phone;
                    }
                }
            },

            UserAction::AddAddress { address } => {
                if let Some(user) = state.user.as_mut() {
                    user.addresses.push(address);
                }
            },

            UserAction::UpdateAddress { address } => {
                if let Some(user) = state.user.as_mut() {
                    if let Some(existing) =
                        user.addresses.iter_mut().find(|addr| addr.id == address.id)
                    {
                        *existing = address;
                    }
                }
            },

            UserAction::RemoveAddress { id } => {
                if let Some(user) = state.user.as_mut() {
                    user.addresses.retain(|addr| addr.id != id);
                }
            },

            UserAction::SetDefaultAddress { id } => {
                if let Some(user) = state.user.as_mut() {
                    user.default_address_id = Some(id.clone());
                    // Sweep the whole list: exactly the matching address
                    // carries the flag afterwards
                    for addr in &mut user.addresses {
                        addr.is_default = addr.id == id;
                    }
                }
            },

            UserAction::SetLoading { loading } => {
                state.loading = loading;
            },
        }

        SmallVec::new()
    }
}

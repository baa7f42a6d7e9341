//! Domain types for the user profile store.

use serde::{Deserialize, Serialize};

/// Unique identifier for a saved address
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressId(String);

impl AddressId {
    /// Creates an `AddressId` from any string-like id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved delivery address
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAddress {
    /// Unique address id
    pub id: AddressId,
    /// Street line
    pub street: String,
    /// City
    pub city: String,
    /// State/region
    pub state: String,
    /// Postal code
    pub zip_code: String,
    /// Whether this is the delivery default; at most one address per user
    /// carries this flag
    pub is_default: bool,
}

/// The authenticated user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Saved addresses
    pub addresses: Vec<UserAddress>,
    /// Id of the default address, if one is chosen; always references a
    /// present address whose `is_default` is true when set by the store
    pub default_address_id: Option<AddressId>,
}

impl User {
    /// Returns the default address, if one is chosen and present
    #[must_use]
    pub fn default_address(&self) -> Option<&UserAddress> {
        let id = self.default_address_id.as_ref()?;
        self.addresses.iter().find(|addr| &addr.id == id)
    }
}

/// Partial profile fields for a shallow merge
///
/// Only `Some` fields are applied; everything else is left as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name, if changing
    pub name: Option<String>,
    /// New email, if changing
    pub email: Option<String>,
    /// New phone number, if changing
    pub phone: Option<String>,
}

/// State of the user profile store
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// The logged-in user, if any
    pub user: Option<User>,
    /// Whether a user is currently authenticated
    pub is_authenticated: bool,
    /// Brackets asynchronous auth operations owned by external
    /// collaborators
    pub loading: bool,
}

impl UserState {
    /// Creates a logged-out state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Actions accepted by the user profile store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    /// Set the user after a successful login
    Login {
        /// The authenticated user
        user: User,
    },

    /// Clear the user and authentication flag
    Logout,

    /// Shallow-merge the provided fields into the user; no-op while logged
    /// out
    UpdateProfile {
        /// Fields to merge
        update: ProfileUpdate,
    },

    /// Append an address; never auto-assigns the default
    AddAddress {
        /// The address to add
        address: UserAddress,
    },

    /// Replace the address matching `address.id`; no-op when not found
    UpdateAddress {
        /// The replacement address
        address: UserAddress,
    },

    /// Remove the address with the given id; idempotent
    RemoveAddress {
        /// Address to remove
        id: AddressId,
    },

    /// Choose the default address
    ///
    /// Sets `default_address_id` and forces `is_default` true on the match
    /// and false on every other address, re-enforcing the exclusivity
    /// invariant on every call.
    SetDefaultAddress {
        /// Address to make default
        id: AddressId,
    },

    /// Toggle the loading flag around an external async operation
    SetLoading {
        /// New flag value
        loading: bool,
    },
}

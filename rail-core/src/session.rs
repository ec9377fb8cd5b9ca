use crate::{BookingError, BookingResult};
use rail_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: Masked<String>,
    pub mobile: Masked<String>,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

impl UserProfile {
    /// Apply the edited fields. Name and email may not be blanked.
    pub fn update(&mut self, update: ProfileUpdate) -> BookingResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(BookingError::InvalidArgument("name must not be empty".to_string()));
            }
        }
        if let Some(email) = &update.email {
            if email.trim().is_empty() {
                return Err(BookingError::InvalidArgument("email must not be empty".to_string()));
            }
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = Masked(email);
        }
        if let Some(mobile) = update.mobile {
            self.mobile = Masked(mobile);
        }
        if let Some(address) = update.address {
            self.address = address;
        }

        tracing::info!("Profile updated for {}", self.name);
        Ok(())
    }
}

/// Per-visitor context handed explicitly to the booking flow. A session
/// without a profile is a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub profile: Option<UserProfile>,
}

impl Session {
    pub fn guest() -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: None,
        }
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: Some(profile),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.profile.is_none()
    }

    /// Identifier recorded on bookings; the profile email when signed in.
    pub fn customer_id(&self) -> Option<Masked<String>> {
        self.profile.as_ref().map(|p| p.email.clone())
    }
}

//! Admin-controlled restriction of the bot to a single channel.

use parking_lot::RwLock;
use tracing::info;

/// Gate errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("You are not authorized to use this command.")]
    Unauthorized,
}

/// Current gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Unrestricted,
    LockedTo(u64),
}

/// Process-wide channel restriction, shared by handle between command handlers
#[derive(Debug, Default)]
pub struct ChannelGate {
    admin_id: Option<u64>,
    state: RwLock<GateState>,
}

impl ChannelGate {
    /// Create an unrestricted gate; without an admin nobody may change it
    #[must_use]
    pub fn new(admin_id: Option<u64>) -> Self {
        Self {
            admin_id,
            state: RwLock::new(GateState::Unrestricted),
        }
    }

    /// Whether `user_id` is the configured administrator
    #[must_use]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_id == Some(user_id)
    }

    /// Restrict replies to `channel_id`
    pub fn lock(&self, requester_id: u64, channel_id: u64) -> Result<(), GateError> {
        self.authorize(requester_id)?;
        *self.state.write() = GateState::LockedTo(channel_id);
        info!("Channel gate locked to {} by {}", channel_id, requester_id);
        Ok(())
    }

    /// Allow replies in every channel again
    pub fn unlock(&self, requester_id: u64) -> Result<(), GateError> {
        self.authorize(requester_id)?;
        *self.state.write() = GateState::Unrestricted;
        info!("Channel gate unlocked by {}", requester_id);
        Ok(())
    }

    #[must_use]
    pub fn is_allowed(&self, channel_id: u64) -> bool {
        match *self.state.read() {
            GateState::Unrestricted => true,
            GateState::LockedTo(locked) => locked == channel_id,
        }
    }

    #[must_use]
    pub fn state(&self) -> GateState {
        *self.state.read()
    }

    /// The channel replies are restricted to, if any
    #[must_use]
    pub fn locked_channel(&self) -> Option<u64> {
        match self.state() {
            GateState::Unrestricted => None,
            GateState::LockedTo(channel) => Some(channel),
        }
    }

    fn authorize(&self, requester_id: u64) -> Result<(), GateError> {
        if self.is_admin(requester_id) {
            Ok(())
        } else {
            Err(GateError::Unauthorized)
        }
    }
}

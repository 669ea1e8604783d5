use serde::{Deserialize, Serialize};

/// Name of the ledger owner. Always present, never removable.
pub const OWNER_NAME: &str = "Me";

/// Placeholder image used when a friend is added without one.
pub const DEFAULT_FRIEND_IMAGE: &str = "default.png";

/// A person expenses can be split with. The name is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub name: String,
    /// Display reference (URL or path); irrelevant to balances
    pub image: Option<String>,
}

impl Friend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    pub fn owner() -> Self {
        Self::new(OWNER_NAME)
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_owner(&self) -> bool {
        self.name == OWNER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_has_no_image() {
        let owner = Friend::owner();
        assert!(owner.is_owner());
        assert_eq!(owner.image, None);
    }

    #[test]
    fn test_owner_check_is_case_sensitive() {
        assert!(!Friend::new("me").is_owner());
        assert!(!Friend::new("Alice").is_owner());
    }

    #[test]
    fn test_with_image() {
        let friend = Friend::new("Alice").with_image("alice.png");
        assert_eq!(friend.image.as_deref(), Some("alice.png"));
    }
}

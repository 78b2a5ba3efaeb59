//! Arena configuration parameters.

use tagheap_core::ArenaError;

use crate::tag::TAG_SIZE;

/// When the arena re-validates its tag chain after a mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelfCheck {
    /// Validate after every allocate and deallocate.
    Always,
    /// Validate only when built with `debug_assertions`.
    #[default]
    DebugOnly,
    /// Never validate automatically.
    Never,
}

impl SelfCheck {
    /// Whether the check runs in the current build.
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::DebugOnly => cfg!(debug_assertions),
            Self::Never => false,
        }
    }
}

/// Configuration for a [`TagArena`](crate::TagArena).
///
/// The capacity is not part of the config: it is the arena's const
/// generic parameter and fixed at compile time. Validated at
/// construction; immutable afterwards.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Byte size of one element.
    ///
    /// A request for `n` elements reserves `n * elem_size` payload bytes,
    /// and a free remainder is only split off when it can hold at least
    /// one element plus its own tag pair. Must be non-zero.
    pub elem_size: usize,

    /// Post-mutation validation policy.
    pub self_check: SelfCheck,
}

impl ArenaConfig {
    /// Default element size: one tag word.
    pub const DEFAULT_ELEM_SIZE: usize = TAG_SIZE;

    /// Create a config for elements of `elem_size` bytes.
    pub fn new(elem_size: usize) -> Self {
        Self {
            elem_size,
            self_check: SelfCheck::default(),
        }
    }

    /// Replace the self-check policy.
    pub fn with_self_check(mut self, self_check: SelfCheck) -> Self {
        self.self_check = self_check;
        self
    }

    /// Smallest block worth splitting off: one element plus a tag pair.
    pub fn min_block(&self) -> usize {
        self.elem_size + 2 * TAG_SIZE
    }

    /// Check the config against an arena of `capacity` bytes.
    pub fn validate(&self, capacity: usize) -> Result<(), ArenaError> {
        if self.elem_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "element size must be non-zero".into(),
            });
        }
        if capacity < 2 * TAG_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity {capacity} cannot hold a tag pair of {} bytes",
                    2 * TAG_SIZE
                ),
            });
        }
        if capacity - 2 * TAG_SIZE > i32::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!("capacity {capacity} exceeds the range of a tag word"),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ELEM_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_block_is_one_element_plus_tags() {
        assert_eq!(ArenaConfig::new(4).min_block(), 12);
        assert_eq!(ArenaConfig::new(16).min_block(), 24);
    }

    #[test]
    fn default_is_debug_only_self_check() {
        let config = ArenaConfig::default();
        assert_eq!(config.elem_size, 4);
        assert_eq!(config.self_check, SelfCheck::DebugOnly);
    }

    #[test]
    fn rejects_zero_element_size() {
        let err = ArenaConfig::new(0).validate(64).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_capacity_below_tag_pair() {
        assert!(ArenaConfig::new(4).validate(7).is_err());
        assert!(ArenaConfig::new(4).validate(8).is_ok());
    }

    #[test]
    fn self_check_policies() {
        assert!(SelfCheck::Always.enabled());
        assert!(!SelfCheck::Never.enabled());
        assert_eq!(SelfCheck::DebugOnly.enabled(), cfg!(debug_assertions));
    }
}

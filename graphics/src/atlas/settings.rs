use crate::atlas::Error;
use crate::Size;

/// The default width and height of a fragment map.
pub const DEFAULT_MAP_SIZE: u32 = 512;

/// The largest width or height a fragment map may have.
///
/// Matches the smallest texture limit commonly guaranteed by GPU APIs.
pub const MAX_MAP_SIZE: u32 = 8192;

/// Width of the replicated border added around each fragment when
/// [`Settings::border`] is enabled.
pub const BORDER_WIDTH: u32 = 1;

/// The configuration of an [`Atlas`](crate::atlas::Atlas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Size of the maps created for shared fragments. Both dimensions must be
    /// powers of two no larger than [`MAX_MAP_SIZE`].
    pub default_map_size: Size<u32>,

    /// Maximum amount of maps. `0` means unlimited.
    pub map_count_limit: usize,

    /// Surround every fragment with a copy of its edge texels so bilinear
    /// filtering never samples a neighbour.
    pub border: bool,
}

impl Settings {
    /// Checks that the settings can be used to create maps.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.default_map_size.is_power_of_two() {
            return Err(Error::InvalidSettings(
                "default map size must be a power of two",
            ));
        }

        if self.default_map_size.width > MAX_MAP_SIZE
            || self.default_map_size.height > MAX_MAP_SIZE
        {
            return Err(Error::InvalidSettings(
                "default map size exceeds the largest map size",
            ));
        }

        Ok(())
    }

    pub(crate) fn border_width(&self) -> u32 {
        if self.border {
            BORDER_WIDTH
        } else {
            0
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_map_size: Size::new(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE),
            map_count_limit: 0,
            border: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();

        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.border_width(), 0);
        assert_eq!(settings.default_map_size, Size::new(512, 512));
    }

    #[test]
    fn rejects_non_power_of_two_maps() {
        let settings = Settings {
            default_map_size: Size::new(500, 512),
            ..Settings::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_maps_larger_than_the_limit() {
        let huge = Settings {
            default_map_size: Size::new(1 << 31, 1 << 31),
            ..Settings::default()
        };
        let largest = Settings {
            default_map_size: Size::new(MAX_MAP_SIZE, MAX_MAP_SIZE),
            ..Settings::default()
        };

        assert!(matches!(huge.validate(), Err(Error::InvalidSettings(_))));
        assert_eq!(largest.validate(), Ok(()));
    }
}

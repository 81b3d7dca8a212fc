//! Binary persistence of the display configuration
//!
//! The stored image is a postcard encoding of
//! `(magic, version, DisplayConfig)`. The header is decoded first so that
//! foreign or stale data fails with a precise error instead of a
//! deserialization error.

use super::types::DisplayConfig;

/// Magic number identifying a stored display configuration
pub const CONFIG_MAGIC: u32 = 0x5342_4443; // "SBDC"

/// Current stored format version
pub const CONFIG_VERSION: u8 = 1;

/// Buffer size that always fits a stored configuration
pub const CONFIG_MAX_SIZE: usize = 64;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed (truncated or corrupt data)
    Deserialize,
    /// Data does not start with [`CONFIG_MAGIC`]
    BadMagic,
    /// Data was written by an incompatible format version
    UnsupportedVersion,
}

impl DisplayConfig {
    /// Serialize into `buf`, returning the used part of it
    pub fn store<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(&(CONFIG_MAGIC, CONFIG_VERSION, *self), buf)
            .map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize a configuration written by [`DisplayConfig::store`]
    pub fn load(bytes: &[u8]) -> Result<Self, ConfigError> {
        let ((magic, version), body): ((u32, u8), _) =
            postcard::take_from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if magic != CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion);
        }

        postcard::from_bytes(body).map_err(|_| ConfigError::Deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ClockMode, TransportKind};
    use crate::framebuffer::BufferLayout;

    #[test]
    fn test_store_load() {
        let mut config = DisplayConfig::default();
        config.transport = TransportKind::Spi;
        config.layout = Some(BufferLayout::Word);
        config.brightness = 4;
        config.clock = ClockMode::Slave;
        config.pins.cs = 3;
        config.spi.frequency_hz = 4_000_000;

        let mut buf = [0u8; CONFIG_MAX_SIZE];
        let bytes = config.store(&mut buf).unwrap();
        let loaded = DisplayConfig::load(bytes).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_store_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(
            DisplayConfig::default().store(&mut buf),
            Err(ConfigError::Serialize)
        );
    }

    #[test]
    fn test_load_rejects_bad_header() {
        let mut buf = [0u8; CONFIG_MAX_SIZE];
        let len = DisplayConfig::default().store(&mut buf).unwrap().len();

        let mut wrong_magic = [0u8; CONFIG_MAX_SIZE];
        let bytes = postcard::to_slice(
            &(0xDEAD_BEEFu32, CONFIG_VERSION, DisplayConfig::default()),
            &mut wrong_magic,
        )
        .unwrap();
        assert_eq!(DisplayConfig::load(bytes), Err(ConfigError::BadMagic));

        let mut wrong_version = [0u8; CONFIG_MAX_SIZE];
        let bytes = postcard::to_slice(
            &(CONFIG_MAGIC, CONFIG_VERSION + 1, DisplayConfig::default()),
            &mut wrong_version,
        )
        .unwrap();
        assert_eq!(
            DisplayConfig::load(bytes),
            Err(ConfigError::UnsupportedVersion)
        );

        assert_eq!(
            DisplayConfig::load(&buf[..len - 1]),
            Err(ConfigError::Deserialize)
        );
        assert_eq!(DisplayConfig::load(&[]), Err(ConfigError::Deserialize));
    }
}

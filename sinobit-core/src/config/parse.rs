//! Minimal TOML parser for display configuration
//!
//! Handles only the subset the display needs. It is NOT a full TOML
//! implementation.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[display]`, `[pins]` and `[spi]` section headers
//! - Comments (# ...), including trailing comments
//!
//! Example:
//!
//! ```toml
//! [display]
//! transport = "spi"
//! brightness = 8
//!
//! [pins]
//! cs = "gpio16"
//! ```

use super::types::{ClockMode, CommonMode, DisplayConfig, TransportKind};
use crate::framebuffer::BufferLayout;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    InvalidKey,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Pins,
    Spi,
}

/// Parse TOML configuration into a DisplayConfig
///
/// Keys that are not given keep their default value.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        match parse_key_value(line) {
            Some((key, value)) => apply_value(section, key, value, &mut config)?,
            None => return Err(ParseError::InvalidValue),
        }
    }

    Ok(config)
}

/// Parse a section header line like "[pins]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| strip_comment(rest).strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "display" => Ok(Section::Display),
        "pins" => Ok(Section::Pins),
        "spi" => Ok(Section::Spi),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Apply a key/value pair in the context of the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match section {
        // Top-level keys are treated as [display] keys
        Section::Root | Section::Display => match key {
            "transport" => config.transport = parse_transport(value)?,
            "layout" => config.layout = parse_layout(value)?,
            "brightness" => config.brightness = parse_int(value)?,
            "blink" => config.blink = parse_bool(value)?,
            "clock" => config.clock = parse_clock(value)?,
            "common" => config.common = parse_common(value)?,
            _ => return Err(ParseError::InvalidKey),
        },
        Section::Pins => match key {
            "cs" => config.pins.cs = parse_pin(value)?,
            "data" | "mosi" => config.pins.data = parse_pin(value)?,
            "wr" | "sck" => config.pins.wr = parse_pin(value)?,
            "rd" | "miso" => config.pins.rd = parse_pin(value)?,
            _ => return Err(ParseError::InvalidKey),
        },
        Section::Spi => match key {
            "frequency" | "frequency_hz" => {
                let frequency: u32 = parse_int(value)?;
                if frequency == 0 {
                    return Err(ParseError::InvalidValue);
                }
                config.spi.frequency_hz = frequency;
            }
            "mode" => {
                let mode: u8 = parse_int(value)?;
                if mode > 3 {
                    return Err(ParseError::InvalidValue);
                }
                config.spi.mode = mode;
            }
            _ => return Err(ParseError::InvalidKey),
        },
    }
    Ok(())
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(hash_pos) if text[..hash_pos].matches('"').count() % 2 == 0 => {
            text[..hash_pos].trim_end()
        }
        _ => text,
    }
}

/// Parse "key = value"
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim()).trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value, quoted or bare
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio16", "p16" or "P16"
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let value = parse_string(value);
    let number = value
        .strip_prefix("gpio")
        .or_else(|| value.strip_prefix('p'))
        .or_else(|| value.strip_prefix('P'))
        .ok_or(ParseError::InvalidPin)?;

    number.parse().map_err(|_| ParseError::InvalidPin)
}

/// Parse transport kind
fn parse_transport(value: &str) -> Result<TransportKind, ParseError> {
    match parse_string(value) {
        "gpio" | "bitbang" | "bit_bang" => Ok(TransportKind::BitBang),
        "spi" | "SPI" => Ok(TransportKind::Spi),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse framebuffer layout ("auto" follows the transport)
fn parse_layout(value: &str) -> Result<Option<BufferLayout>, ParseError> {
    match parse_string(value) {
        "auto" => Ok(None),
        "word" => Ok(Some(BufferLayout::Word)),
        "nibble" => Ok(Some(BufferLayout::Nibble)),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse clock source
fn parse_clock(value: &str) -> Result<ClockMode, ParseError> {
    match parse_string(value) {
        "rc_master" | "rc" => Ok(ClockMode::RcMaster),
        "ext_clock" | "ext_clock_master" => Ok(ClockMode::ExtClockMaster),
        "slave" => Ok(ClockMode::Slave),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse common driver mode
fn parse_common(value: &str) -> Result<CommonMode, ParseError> {
    match parse_string(value) {
        "nmos8" => Ok(CommonMode::NMos8),
        "nmos16" => Ok(CommonMode::NMos16),
        "pmos8" => Ok(CommonMode::PMos8),
        "pmos16" => Ok(CommonMode::PMos16),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_config("").unwrap(), DisplayConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            DisplayConfig::default()
        );
    }

    #[test]
    fn test_parse_full() {
        let input = r#"
# sino:bit on SPI
[display]
transport = "spi"
layout = "word"       # override the nibble default
brightness = 7
blink = true
clock = "ext_clock"
common = "pmos8"

[pins]
cs = "gpio5"
data = "p21"
wr = "P23"
rd = gpio22

[spi]
frequency = 2000000
mode = 3
"#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.transport, TransportKind::Spi);
        assert_eq!(config.layout(), BufferLayout::Word);
        assert_eq!(config.brightness, 7);
        assert!(config.blink);
        assert_eq!(config.clock, ClockMode::ExtClockMaster);
        assert_eq!(config.common, CommonMode::PMos8);
        assert_eq!(config.pins.cs, 5);
        assert_eq!(config.pins.data, 21);
        assert_eq!(config.pins.wr, 23);
        assert_eq!(config.pins.rd, 22);
        assert_eq!(config.spi.frequency_hz, 2_000_000);
        assert_eq!(config.spi.mode, 3);
    }

    #[test]
    fn test_root_keys_apply_to_display() {
        let config = parse_config("brightness = 3").unwrap();
        assert_eq!(config.brightness, 3);
    }

    #[test]
    fn test_auto_layout() {
        let config = parse_config("transport = \"spi\"\nlayout = \"auto\"").unwrap();
        assert_eq!(config.layout, None);
        assert_eq!(config.layout(), BufferLayout::Nibble);
    }

    #[test]
    fn test_hash_inside_string_is_kept() {
        assert_eq!(parse_key_value(r#"a = "x#y""#), Some(("a", r#""x#y""#)));
        assert_eq!(parse_key_value("a = 1 # one"), Some(("a", "1")));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[fonts]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[pins"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("colour = 1"), Err(ParseError::InvalidKey));
        assert_eq!(
            parse_config("[pins]\nbrightness = 1"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(parse_config("brightness = -1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("blink = yes"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[spi]\nmode = 4"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[spi]\nfrequency = 0"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("transport"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[pins]\ncs = \"pa5\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_config("[pins]\ncs = \"gpio300\""), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("\"gpio16\""), Ok(16));
        assert_eq!(parse_pin("p0"), Ok(0));
        assert_eq!(parse_pin("P31"), Ok(31));
        assert_eq!(parse_pin("16"), Err(ParseError::InvalidPin));
    }
}

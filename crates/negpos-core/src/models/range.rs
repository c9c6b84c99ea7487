//! Per-channel extremum statistics.

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

use super::Channel;

/// Observed minimum and maximum of one color channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    /// The full 8-bit range, which stretches every sample onto itself
    pub const FULL: ChannelRange = ChannelRange { min: 0, max: 255 };

    pub fn validate(&self, channel: Channel) -> Result<()> {
        if self.min > self.max {
            return Err(ConvertError::InvalidRange {
                channel,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// min == max: the channel carries a single value and has no span to stretch
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn span(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }
}

/// Independent ranges for the three color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRanges {
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl ChannelRanges {
    pub fn get(&self, channel: Channel) -> ChannelRange {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            self.get(channel).validate(channel)?;
        }
        Ok(())
    }

    /// Channels whose range collapsed to a single value
    pub fn degenerate_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|&c| self.get(c).is_degenerate())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        assert!(ChannelRange { min: 10, max: 10 }.validate(Channel::Blue).is_ok());
        let err = ChannelRange { min: 11, max: 10 }
            .validate(Channel::Blue)
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_degenerate_and_span() {
        let flat = ChannelRange { min: 55, max: 55 };
        assert!(flat.is_degenerate());
        assert_eq!(flat.span(), 0);

        let wide = ChannelRange { min: 5, max: 245 };
        assert!(!wide.is_degenerate());
        assert_eq!(wide.span(), 240);
    }

    #[test]
    fn test_ranges_validate_reports_channel() {
        let ranges = ChannelRanges {
            red: ChannelRange::FULL,
            green: ChannelRange { min: 200, max: 100 },
            blue: ChannelRange::FULL,
        };
        match ranges.validate() {
            Err(ConvertError::InvalidRange { channel, min, max }) => {
                assert_eq!(channel, Channel::Green);
                assert_eq!((min, max), (200, 100));
            }
            other => panic!("expected invalid green range, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_channels() {
        let ranges = ChannelRanges {
            red: ChannelRange { min: 5, max: 245 },
            green: ChannelRange { min: 55, max: 55 },
            blue: ChannelRange { min: 0, max: 0 },
        };
        assert_eq!(
            ranges.degenerate_channels(),
            vec![Channel::Green, Channel::Blue]
        );
    }
}

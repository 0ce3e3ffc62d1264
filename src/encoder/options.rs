use crate::error::{QrError, Result};
use crate::models::{MaskPattern, Version};

/// Per-call encoder settings.
///
/// ```
/// use qr_forge::encoder::options::EncodeOptions;
///
/// let opts = EncodeOptions::new().version_range(1, 10).mask(3).boost_ecl(false);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Smallest version tried (1-40)
    pub min_version: u8,
    /// Largest version tried (1-40)
    pub max_version: u8,
    /// Pinned mask index; None selects the lowest-penalty mask
    pub mask: Option<u8>,
    /// Raise the error correction level while the data still fits the chosen version
    pub boost_ecl: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            min_version: Version::MIN.number(),
            max_version: Version::MAX.number(),
            mask: None,
            boost_ecl: true,
        }
    }
}

impl EncodeOptions {
    /// Defaults: versions 1-40, automatic mask, boost on
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest version to try
    pub fn min_version(mut self, min: u8) -> Self {
        self.min_version = min;
        self
    }

    /// Largest version to try
    pub fn max_version(mut self, max: u8) -> Self {
        self.max_version = max;
        self
    }

    /// Both version bounds at once
    pub fn version_range(self, min: u8, max: u8) -> Self {
        self.min_version(min).max_version(max)
    }

    /// Pin the mask index (0-7)
    pub fn mask(mut self, index: u8) -> Self {
        self.mask = Some(index);
        self
    }

    /// Choose the mask by penalty
    pub fn auto_mask(mut self) -> Self {
        self.mask = None;
        self
    }

    /// Enable or disable level boosting
    pub fn boost_ecl(mut self, boost: bool) -> Self {
        self.boost_ecl = boost;
        self
    }

    /// Check version bounds and the pinned mask
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Typed bounds and mask, or the first option error
    pub(crate) fn resolve(&self) -> Result<(Version, Version, Option<MaskPattern>)> {
        let bounds_err = || QrError::InvalidVersionBounds {
            min: self.min_version,
            max: self.max_version,
        };
        let min = Version::new(self.min_version).ok_or_else(bounds_err)?;
        let max = Version::new(self.max_version).ok_or_else(bounds_err)?;
        if min > max {
            return Err(bounds_err());
        }

        let mask = match self.mask {
            Some(index) => {
                Some(MaskPattern::from_index(index).ok_or(QrError::InvalidMaskIndex(index))?)
            }
            None => None,
        };
        Ok((min, max, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.min_version, 1);
        assert_eq!(opts.max_version, 40);
        assert_eq!(opts.mask, None);
        assert!(opts.boost_ecl);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_invalid_mask() {
        let opts = EncodeOptions::new().mask(8);
        assert_eq!(opts.validate(), Err(QrError::InvalidMaskIndex(8)));
        assert!(opts.auto_mask().validate().is_ok());
    }

    #[test]
    fn test_invalid_version_bounds() {
        for (min, max) in [(0, 40), (1, 41), (10, 9)] {
            assert_eq!(
                EncodeOptions::new().version_range(min, max).validate(),
                Err(QrError::InvalidVersionBounds { min, max })
            );
        }
    }

    #[test]
    fn test_resolve() {
        let (min, max, mask) = EncodeOptions::new()
            .version_range(5, 5)
            .mask(7)
            .resolve()
            .unwrap();
        assert_eq!(min, max);
        assert_eq!(min.number(), 5);
        assert_eq!(mask, Some(MaskPattern::Pattern7));
    }
}

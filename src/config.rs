//! LongMapConfig: sizing and growth parameters for `LongHashMap`.

use core::fmt;
use core::mem;
use slotmap::DefaultKey;

/// Table length of a map built with `LongHashMap::new`.
pub const DEFAULT_CAPACITY: usize = 16;

/// Ratio of live entries to buckets above which the table grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Multiplier applied to the table length on each resize.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Smallest accepted load factor. Anything lower keeps the threshold at
/// zero and doubles the table on every insert.
pub const MIN_LOAD_FACTOR: f64 = 1.0 / 16.0;

/// Smallest table the map will allocate.
pub const MIN_CAPACITY: usize = 2;

/// Largest table the map will allocate: the biggest power of two whose
/// bucket array still fits in `isize::MAX` bytes. Past this point chains
/// absorb further inserts instead of the table growing.
pub const MAX_CAPACITY: usize = {
    let fit = isize::MAX as usize / mem::size_of::<Option<DefaultKey>>();
    1 << (usize::BITS - 1 - fit.leading_zeros())
};

/// Rejected configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `initial_capacity` was zero.
    ZeroCapacity,
    /// `initial_capacity` rounds up past `MAX_CAPACITY`, or the bucket
    /// array could not be allocated.
    CapacityOverflow,
    /// `load_factor` was NaN, infinite, or below `MIN_LOAD_FACTOR`.
    InvalidLoadFactor,
    /// `growth_factor` was below 2 or not a power of two.
    InvalidGrowthFactor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ConfigError::ZeroCapacity => "initial capacity must be non-zero",
            ConfigError::CapacityOverflow => "initial capacity cannot be allocated",
            ConfigError::InvalidLoadFactor => "load factor must be finite and at least 1/16",
            ConfigError::InvalidGrowthFactor => "growth factor must be a power of two of at least 2",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for ConfigError {}

/// Construction parameters for `LongHashMap::with_config`.
///
/// Built from `Default` and adjusted with the `with_*` setters; nothing is
/// checked until `validate` (or `with_config`) runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongMapConfig {
    initial_capacity: usize,
    load_factor: f64,
    growth_factor: usize,
}

impl Default for LongMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl LongMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested starting table length; rounded up to a power of two.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Check every parameter, reporting the first one that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityOverflow);
        }
        if !self.load_factor.is_finite() || self.load_factor < MIN_LOAD_FACTOR {
            return Err(ConfigError::InvalidLoadFactor);
        }
        if self.growth_factor < 2 || !self.growth_factor.is_power_of_two() {
            return Err(ConfigError::InvalidGrowthFactor);
        }
        Ok(())
    }

    /// Table length actually allocated for `initial_capacity`.
    pub(crate) fn table_capacity(&self) -> usize {
        self.initial_capacity
            .clamp(MIN_CAPACITY, MAX_CAPACITY)
            .next_power_of_two()
    }

    /// Number of entries a table of `capacity` buckets holds before growing.
    pub(crate) fn threshold_for(&self, capacity: usize) -> usize {
        // `as` saturates, so very large load factors simply never trigger growth.
        (capacity as f64 * self.load_factor) as usize
    }

    /// Next table length after `capacity`, or `None` once `MAX_CAPACITY` is reached.
    pub(crate) fn grown_capacity(&self, capacity: usize) -> Option<usize> {
        capacity
            .checked_mul(self.growth_factor)
            .filter(|&c| c <= MAX_CAPACITY)
    }
}

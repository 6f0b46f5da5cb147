//! Game configuration catalogs and their construction-time validation.

use std::{fmt, time::Duration};

use thiserror::Error;

/// Smallest row or column count the maze generator accepts.
pub const MIN_DIMENSION: u32 = 5;

/// Errors raised while constructing configuration values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Maze dimensions must both be odd so passages sit on odd indices.
    #[error("maze dimensions must be odd, got {rows}x{columns}")]
    EvenDimension {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// Maze dimensions fall below [`MIN_DIMENSION`].
    #[error("maze dimensions must be at least {minimum}x{minimum}, got {rows}x{columns}")]
    DimensionTooSmall {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
        /// Smallest accepted dimension.
        minimum: u32,
    },
    /// Pursuer density must be finite and non-negative.
    #[error("pursuer density must be a finite, non-negative number, got {density}")]
    InvalidDensity {
        /// Requested density.
        density: f64,
    },
    /// Tick intervals must be strictly positive.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    /// No catalog entry carries the requested name.
    #[error("unknown {catalog} `{name}`")]
    UnknownEntry {
        /// Label of the catalog that was searched.
        catalog: &'static str,
        /// Name that failed to match.
        name: String,
    },
}

/// Catalog entries expose a human-readable name.
pub trait Named {
    /// Name presented to players.
    fn name(&self) -> &str;
}

/// Validated odd maze dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: u32,
    columns: u32,
}

impl Dimensions {
    /// Validates and creates maze dimensions.
    pub fn new(rows: u32, columns: u32) -> Result<Self, ConfigError> {
        if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
            return Err(ConfigError::DimensionTooSmall {
                rows,
                columns,
                minimum: MIN_DIMENSION,
            });
        }
        if rows % 2 == 0 || columns % 2 == 0 {
            return Err(ConfigError::EvenDimension { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    const fn preset(rows: u32, columns: u32) -> Self {
        assert!(rows >= MIN_DIMENSION && columns >= MIN_DIMENSION);
        assert!(rows % 2 == 1 && columns % 2 == 1);
        Self { rows, columns }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }
}

/// Difficulty level controlling how crowded the maze is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    name: &'static str,
    pursuer_density: f64,
}

impl Difficulty {
    /// Validates and creates a difficulty with `pursuer_density` pursuers per 1000 cells.
    pub fn new(name: &'static str, pursuer_density: f64) -> Result<Self, ConfigError> {
        if !pursuer_density.is_finite() || pursuer_density < 0.0 {
            return Err(ConfigError::InvalidDensity {
                density: pursuer_density,
            });
        }
        Ok(Self {
            name,
            pursuer_density,
        })
    }

    const fn preset(name: &'static str, pursuer_density: f64) -> Self {
        Self {
            name,
            pursuer_density,
        }
    }

    /// Pursuers generated per 1000 maze cells.
    #[must_use]
    pub const fn pursuer_density(&self) -> f64 {
        self.pursuer_density
    }

    /// Number of pursuers for a maze of the provided dimensions, rounded down.
    #[must_use]
    pub fn pursuer_count(&self, dimensions: Dimensions) -> usize {
        (dimensions.area() as f64 * self.pursuer_density / 1000.0) as usize
    }
}

impl Named for Difficulty {
    fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Selectable maze size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabSize {
    name: &'static str,
    dimensions: Dimensions,
}

impl LabSize {
    /// Validates and creates a maze size.
    pub fn new(name: &'static str, rows: u32, columns: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            name,
            dimensions: Dimensions::new(rows, columns)?,
        })
    }

    const fn preset(name: &'static str, rows: u32, columns: u32) -> Self {
        Self {
            name,
            dimensions: Dimensions::preset(rows, columns),
        }
    }

    /// Dimensions of mazes generated with this size.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl Named for LabSize {
    fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for LabSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{})",
            self.name,
            self.dimensions.rows(),
            self.dimensions.columns()
        )
    }
}

/// Game speed expressed as the real-time delay between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Speed {
    name: &'static str,
    tick_interval: Duration,
}

impl Speed {
    /// Validates and creates a speed.
    pub fn new(name: &'static str, tick_interval: Duration) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(Self {
            name,
            tick_interval,
        })
    }

    const fn preset(name: &'static str, millis: u64) -> Self {
        assert!(millis > 0);
        Self {
            name,
            tick_interval: Duration::from_millis(millis),
        }
    }

    /// Real-time delay between two engine ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Ticks per second, rounded half up.
    #[must_use]
    pub fn frames_per_second(&self) -> u128 {
        let interval = self.tick_interval.as_nanos().max(1);
        (Duration::from_secs(1).as_nanos() + interval / 2) / interval
    }
}

impl Named for Speed {
    fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} FPS)", self.name, self.frames_per_second())
    }
}

/// Ordered, read-only list of choices with one default entry.
#[derive(Clone, Copy, Debug)]
pub struct Catalog<T: 'static> {
    label: &'static str,
    entries: &'static [T],
    default_index: usize,
}

impl<T: 'static> Catalog<T> {
    /// Creates a catalog, rejecting empty lists and out-of-range defaults.
    ///
    /// Catalogs are process-lifetime constants, so an invalid one fails when
    /// the constant is evaluated rather than while a game is running.
    #[must_use]
    pub const fn new(label: &'static str, entries: &'static [T], default_index: usize) -> Self {
        assert!(!entries.is_empty(), "catalogs must not be empty");
        assert!(
            default_index < entries.len(),
            "catalog default must reference an entry"
        );
        Self {
            label,
            entries,
            default_index,
        }
    }

    /// Label describing what the catalog selects.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Entries in presentation order.
    #[must_use]
    pub const fn entries(&self) -> &'static [T] {
        self.entries
    }

    /// Index of the default entry.
    #[must_use]
    pub const fn default_index(&self) -> usize {
        self.default_index
    }

    /// Entry at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'static T> {
        self.entries.get(index)
    }

    /// Index following `index`, wrapping around to the first entry.
    #[must_use]
    pub const fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len()
    }
}

impl<T: Copy + 'static> Catalog<T> {
    /// The default entry.
    #[must_use]
    pub fn default_entry(&self) -> T {
        self.entries[self.default_index]
    }
}

impl<T: Named + Copy + 'static> Catalog<T> {
    /// Finds an entry by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Result<T, ConfigError> {
        self.entries
            .iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| ConfigError::UnknownEntry {
                catalog: self.label,
                name: name.to_owned(),
            })
    }
}

/// Difficulties ordered from easiest to hardest.
pub const DIFFICULTIES: Catalog<Difficulty> = Catalog::new(
    "difficulty",
    &[
        Difficulty::preset("Baby", 0.0),
        Difficulty::preset("Easy", 5.0),
        Difficulty::preset("Normal", 10.0),
        Difficulty::preset("Hard", 20.0),
        Difficulty::preset("Brutal", 40.0),
    ],
    2,
);

/// Maze sizes ordered from smallest to largest.
pub const LAB_SIZES: Catalog<LabSize> = Catalog::new(
    "lab size",
    &[
        LabSize::preset("XS", 9, 9),
        LabSize::preset("S", 15, 15),
        LabSize::preset("M", 33, 33),
        LabSize::preset("L", 51, 51),
        LabSize::preset("XL", 99, 99),
    ],
    2,
);

/// Speeds ordered from slowest to fastest.
pub const SPEEDS: Catalog<Speed> = Catalog::new(
    "speed",
    &[
        Speed::preset("Slow", 67),
        Speed::preset("Normal", 50),
        Speed::preset("Fast", 37),
    ],
    1,
);

/// Immutable selection used to start a new game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    difficulty: Difficulty,
    lab_size: LabSize,
    speed: Speed,
}

impl GameConfig {
    /// Bundles the three selections into a configuration.
    #[must_use]
    pub const fn new(difficulty: Difficulty, lab_size: LabSize, speed: Speed) -> Self {
        Self {
            difficulty,
            lab_size,
            speed,
        }
    }

    /// Selected difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Selected maze size.
    #[must_use]
    pub const fn lab_size(&self) -> LabSize {
        self.lab_size
    }

    /// Selected speed.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.speed
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            DIFFICULTIES.default_entry(),
            LAB_SIZES.default_entry(),
            SPEEDS.default_entry(),
        )
    }
}

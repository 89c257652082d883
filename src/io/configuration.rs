//! Color-space constants and runtime configuration defaults

/// Extent of each axis of the 8-bit color cube
pub const COLOR_CUBE_EXTENT: i32 = 256;

/// Samples per pixel in training buffers (RGB)
pub const CHANNELS: usize = 3;

// Every 8-bit color fits in a single bucket
/// Default number of points a bucket may hold
pub const DEFAULT_BUCKET_CAPACITY: usize = 256 * 256 * 256;

/// Default number of palette buckets
pub const DEFAULT_PALETTE_SIZE: usize = 16;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default width of generated images in pixels
pub const DEFAULT_OUTPUT_WIDTH: usize = 128;
/// Default height of generated images in pixels
pub const DEFAULT_OUTPUT_HEIGHT: usize = 128;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 10_000;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_generated";
/// Extension of generated images
pub const OUTPUT_EXTENSION: &str = "png";

/// Training file extensions picked up when scanning a directory
pub const TRAINING_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "chromarkov=warn";
/// Log filter used with `--verbose`
pub const VERBOSE_LOG_FILTER: &str = "chromarkov=info";

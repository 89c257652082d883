//! Command-line interface for training a palette model and generating an image

use crate::io::configuration::{
    DEFAULT_BUCKET_CAPACITY, DEFAULT_LOG_FILTER, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH,
    DEFAULT_PALETTE_SIZE, DEFAULT_SEED, MAX_OUTPUT_DIMENSION, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    TRAINING_EXTENSIONS, VERBOSE_LOG_FILTER,
};
use crate::io::error::{ChromaError, Result, invalid_parameter};
use crate::io::image::{export_grid_as_png, load_training_image};
use crate::io::progress::ProgressManager;
use crate::model::generate::generate;
use crate::model::training::TrainingImage;
use crate::model::transition::TransitionModel;
use crate::palette::builder::PaletteBuilder;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "chromarkov")]
#[command(
    author,
    version,
    about = "Quantize training images by median cut and generate new ones from neighbor statistics"
)]
/// Command-line arguments for the training and generation tool
pub struct Cli {
    /// Training image or directory of training images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of palette colors
    #[arg(short, long, default_value_t = DEFAULT_PALETTE_SIZE)]
    pub colors: usize,

    /// Maximum distinct colors held by a palette bucket
    #[arg(short = 'C', long, default_value_t = DEFAULT_BUCKET_CAPACITY)]
    pub capacity: usize,

    /// Width of the generated image in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Height of the generated image in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output path (defaults to `<target>_generated.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log pipeline statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate even if the output already exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if an existing output file should be left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter applied when `RUST_LOG` is not set
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }

    /// Reject parameter values the pipeline cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidParameter`] for a zero palette size or
    /// capacity, or output dimensions outside `1..=MAX_OUTPUT_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        if self.colors == 0 {
            return Err(invalid_parameter(
                "colors",
                &self.colors,
                &"palette needs at least one color",
            ));
        }
        if self.capacity == 0 {
            return Err(invalid_parameter(
                "capacity",
                &self.capacity,
                &"buckets must hold at least one color",
            ));
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_OUTPUT_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }

    /// Where the generated image is written
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        let stem = self.target.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        );

        if self.target.is_dir() {
            self.target.join(output_name)
        } else if let Some(parent) = self.target.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Runs the full pipeline: load, quantize, train, generate, export
pub struct Pipeline {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Pipeline {
    /// Create a pipeline for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run every stage and return the written image path
    ///
    /// Returns `Ok(None)` when the output already exists and skipping is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation, image loading, palette
    /// construction, training, generation or export fails
    pub fn process(&mut self) -> Result<Option<PathBuf>> {
        self.cli.validate()?;

        let output_path = self.cli.output_path();
        if self.cli.skip_existing() && output_path.exists() {
            tracing::warn!(path = %output_path.display(), "Skipping: output exists");
            return Ok(None);
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Err(ChromaError::InvalidSourceData {
                reason: format!("no training images found in '{}'", self.cli.target.display()),
            });
        }

        let images = self.load_images(&files)?;
        let mut rng = StdRng::seed_from_u64(self.cli.seed);

        self.stage("Building palette");
        let palette = PaletteBuilder::new(self.cli.colors, self.cli.capacity)
            .build(images.iter().flat_map(|image| image.colors()), &mut rng)?;
        tracing::info!(buckets = palette.len(), "Palette built");

        self.stage("Training transition model");
        let mut model = TransitionModel::new(palette.len());
        model.populate(&images, &palette)?;

        self.stage("Generating image");
        let grid = generate(
            &model,
            &palette,
            self.cli.width,
            self.cli.height,
            &mut rng,
        )?;
        export_grid_as_png(&grid, &output_path)?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        tracing::info!(path = %output_path.display(), "Generated image written");

        Ok(Some(output_path))
    }

    fn stage(&mut self, message: &str) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage(message);
        }
    }

    fn load_images(&mut self, files: &[PathBuf]) -> Result<Vec<TrainingImage>> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_loading(files.len());
        }

        let mut images = Vec::with_capacity(files.len());
        for file in files {
            images.push(load_training_image(file)?);
            if let Some(ref pm) = self.progress_manager {
                pm.file_loaded(file);
            }
        }
        Ok(images)
    }

    /// Training files named by the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image file nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_training_file(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file is not a supported image type",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| ChromaError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file() && is_training_file(&path) && !is_generated_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or a directory",
            ))
        }
    }
}

fn is_training_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            TRAINING_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

// Earlier outputs in a training directory must not feed back into training.
fn is_generated_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

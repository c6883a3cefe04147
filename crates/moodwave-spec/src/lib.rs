//! Moodwave Parameter Library
//!
//! This crate provides the parameter record shared by the Moodwave
//! generators, the fixed scale and instrument lookup tables, and the seed
//! derivation used to give each generator its own random stream.
//!
//! # Example
//!
//! ```
//! use moodwave_spec::{GenerationParameters, Genre, Mood, Style};
//! use moodwave_spec::tables::scale_for;
//!
//! let params = GenerationParameters::new(Mood::Energetic, Genre::Rock)
//!     .with_tempo(140)
//!     .with_style(Style::Complex);
//!
//! assert!(params.validate().is_ok());
//! assert_eq!(params.instrument_program_id, 29);
//! assert_eq!(scale_for(&params.mood), Some(&[60, 64, 67, 69, 72][..]));
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error type for parameter resolution and validation
//! - [`params`]: Mood, genre, style, and the parameter record
//! - [`tables`]: Scale and instrument lookup tables
//! - [`rng`]: Seeded and entropy-backed random sources

pub mod error;
pub mod params;
pub mod rng;
pub mod tables;

pub use error::SpecError;
pub use params::{GenerationParameters, Genre, Mood, ParameterFile, Style};
pub use rng::{derive_stream_seed, entropy_rng, seeded_rng, GenRng};
pub use tables::{instrument_for, resolve_scale, scale_for};

/// Lowest tempo accepted by [`GenerationParameters::validate`].
pub const MIN_TEMPO: u32 = 20;

/// Highest tempo accepted by [`GenerationParameters::validate`].
pub const MAX_TEMPO: u32 = 300;

/// Tempo used when the caller does not provide one.
pub const DEFAULT_TEMPO: u32 = 120;

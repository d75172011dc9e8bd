// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # whoopdata Store
//!
//! Everything that touches the local machine:
//!
//! - **Settings**: request and output tunables loaded from a JSON file
//! - **Credentials**: explicit values with environment fallback
//! - **Output**: timestamped JSON export files
//! - **Persistence**: atomic JSON file I/O helpers
//!
//! ## Usage
//!
//! ```ignore
//! use whoopdata_store::{ExportKind, Settings, resolve_credentials, write_export};
//!
//! let settings = Settings::load(None).await?;
//! let credentials = resolve_credentials(None, None)?;
//!
//! let path = write_export(&settings.output_dir, ExportKind::Sleep, &records).await?;
//! ```

pub mod credentials;
pub mod error;
pub mod output;
pub mod persistence;
pub mod settings;

pub use credentials::{PASSWORD_ENV, USERNAME_ENV, resolve_credentials, resolve_credentials_with};
pub use error::StoreError;
pub use output::{
    ExportKind, export_path, with_kind_suffix, write_export, write_export_at, write_export_to,
};
pub use persistence::{
    default_config_dir, default_settings_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use settings::Settings;

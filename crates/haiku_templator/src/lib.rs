//! # haiku_templator
//!
//! Evaluates the Jsonnet entry file of an environment and turns the result
//! into resources.
//!
//! A project is laid out as:
//!
//! ```text
//! lib/                          # import root
//! vendor/                       # import root
//! <env>/.metadata/              # import root
//! environments/<env>/main.libsonnet   (or main.jsonnet)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use haiku_templator::{JsonnetTemplator, Templator, TemplatorConfig};
//!
//! let config = TemplatorConfig::new().with_root("/srv/deploy");
//! let templator = JsonnetTemplator::with_config("prod", &config)?;
//! for resource in templator.template()? {
//!     println!("{} {}", resource.api_version(), resource.kind());
//! }
//! # Ok::<(), haiku_templator::TemplatorError>(())
//! ```

pub mod config;
pub mod error;
pub mod native;
pub mod paths;
pub mod templator;
pub mod vm;

pub use config::TemplatorConfig;
pub use error::{NativeError, NativeResult, TemplatorError, TemplatorResult};
pub use paths::{resolve, EnvironmentResolver, ResolvedPaths};
pub use templator::{JsonnetTemplator, Templator};
pub use vm::{native_names, JsonnetVm};

//! Application bootstrap configuration.
//!
//! This crate provides a layered configuration store per application
//! namespace, a search path for locating environment-specific files, and
//! an ordered initializer pipeline that applies those files and then runs
//! named setup steps.
//!
//! ```no_run
//! use roadie_config::{HandlerRegistry, Namespace};
//!
//! # fn main() -> Result<(), roadie_config::ConfigError> {
//! let app = Namespace::register("my_app");
//! app.config().set("initializers", serde_json::json!(["logging"]));
//!
//! let mut handlers = HandlerRegistry::new().with("logging", |cfg| {
//!     let level = cfg.get("log_level")?;
//!     println!("log level: {level:?}");
//!     Ok(())
//! });
//!
//! app.setup_with(&mut handlers, |cfg| cfg.set("log_level", "debug"))?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod defaults;
mod env;
pub mod environment_file;
mod error;
pub mod initializer;
mod namespace;
pub mod search_path;
mod store;
pub mod types;

pub use defaults::install_defaults;
pub use env::{default_environment, env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use initializer::{HandlerRegistry, InitializerRun, RunReport, RunState, handler_name};
pub use namespace::Namespace;
pub use search_path::resolve as resolve_path;
pub use store::ConfigStore;
pub use types::{ConfigOption, LazyValue, OptionValue};

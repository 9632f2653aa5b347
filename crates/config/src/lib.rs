//! Environment-specific dotenv loading with schema validation.
//!
//! `NODE_ENV` selects one of the canonical environments (`prod`, `test`, `dev`,
//! `local`). The loader reads `<base>/<env>` and then `<base>/.env` without
//! overriding variables that are already set, and validates the result against
//! a caller-supplied [`Schema`].
//!
//! ```no_run
//! use envstage_config::{ConfigOptions, Schema, configure, port, str};
//!
//! let env = configure(
//!     Schema::new()
//!         .field("PORT", port().dev_default(3000))
//!         .field("DATABASE_URL", str()),
//!     ConfigOptions::new().with_show_environment_files(true),
//! )?;
//! let port = env.u16("PORT");
//! # Ok::<(), envstage_config::ConfigError>(())
//! ```

mod clean;
pub mod constants;
pub mod environment;
mod error;
mod loader;
pub mod schema;
mod vars;

pub use clean::{CleanedEnv, clean};
pub use environment::{Environment, alias_names, node_env};
pub use error::{ConfigError, EnvError, ValidationErrors};
pub use loader::{ConfigLoader, ConfigOptions, ShowEnvironmentFiles, candidate_files, configure};
pub use schema::{
    DevDefault, Field, FieldKind, Schema, bool, email, host, json, make_validator, num, port, str,
    url,
};
pub use vars::EnvVars;

//! Payload loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - Payload reading and step extraction in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use helm3_step::config::{parse_install_action, validate};
//!
//! let payload = b"install:\n  - helm3:\n      name: web\n      chart: stable/nginx\n";
//! let step = parse_install_action(payload).unwrap();
//! validate(&step).unwrap();
//! assert_eq!(step.chart, "stable/nginx");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use schema::{InstallAction, InstallStep, OutputDeclaration, RepositoryEntry, StepEnvelope};

pub use loader::{parse_install_action, read_payload};

pub use validator::{validate, validate_step, ValidationError};

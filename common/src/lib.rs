//! Template authoring model shared by the service and its clients.
//!
//! The pipeline for one draft is: [`params`] classifies and extracts the
//! placeholders of the body text, [`examples`] keeps the example values in step
//! with them, [`validate`] checks the draft before submission and [`wire`]
//! shapes it into the API's component array. Everything here is synchronous
//! and free of I/O.

pub mod examples;
pub mod model;
pub mod name;
pub mod params;
pub mod preview;
pub mod requests;
pub mod session;
pub mod transform;
pub mod validate;
pub mod wire;

pub use examples::{Examples, NamedExample};
pub use model::body::Body;
pub use model::template::{Button, Category, Footer, Header, HeaderFormat, TemplateDraft};
pub use params::ParameterKind;
pub use validate::{validate, ValidationError};
pub use wire::{serialize, submit, Component, TemplateRequest};

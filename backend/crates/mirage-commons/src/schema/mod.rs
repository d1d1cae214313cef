//! Schema metadata model.
//!
//! A schema description is a JSON object mapping resource names to property
//! descriptions. Parsed once into [`Metadata`], it drives endpoint generation
//! on the server and surface generation on the client.

mod metadata;
mod property;
mod resource;

pub use metadata::Metadata;
pub use property::PropertyMetadata;
pub use resource::ResourceMetadata;

//! Data model layer
//!
//! Snapshot feed types and resource kind definitions shared by the
//! graph builder, layout engine and deletion coordinator.

mod resource_kind;
mod snapshot;

pub use resource_kind::ResourceKind;
pub use snapshot::{
    format_age, NamespaceResource, ResourceItem, ResourceMetadata, Snapshot,
};

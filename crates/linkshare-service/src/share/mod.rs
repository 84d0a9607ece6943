//! Share links: resolution, authorization, confinement, file operations
//! and link lifecycle.

pub mod archive;
pub mod executor;
pub mod gate;
pub mod link;
pub mod params;
pub mod pipeline;
pub mod policy;
pub mod public;
pub mod resolver;
pub mod scope;
pub mod service;

pub use executor::{FileOpExecutor, WriteOutcome};
pub use gate::{PasswordGate, ShareCredentials};
pub use link::LinkService;
pub use params::{TransferAction, TransferRequest};
pub use pipeline::{SharePipeline, SharedResourceContext, SharedView};
pub use policy::AccessPolicy;
pub use public::{Download, PublicShareResponse, PublicShareService, SharePermissionInfo};
pub use resolver::{LinkResolver, ResolvedLink, SharePath, split_share_path};
pub use scope::{FileInfo, ScopeBinder, ShareScope};
pub use service::{PublicShareEntry, ShareService};

#[cfg(test)]
pub(crate) mod testing;

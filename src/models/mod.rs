//! Data models
//!
//! This module contains the data structures that flow through one generation
//! request:
//! - The collected form fields (ContractRequest)
//! - The generated document text (GeneratedContract)
//! - Rendered downloads (ExportArtifact)

mod contract;

pub use contract::{
    AuthMethod, ContractRequest, ExportArtifact, ExportFormat, GeneratedContract,
    UnknownAuthMethod,
};

// SPDX-License-Identifier: MIT

//! Provides [`BootError`], which encapsulates other errors

use thiserror::Error;

/// An `Error` resulting from the chooser core.
#[derive(Error, Debug)]
pub enum BootError {
    /// The device registry rejected an insertion.
    #[error("Registry Error")]
    Registry(#[from] crate::device::RegistryError),

    /// A device manifest could not be read.
    #[error("Device Source Error")]
    Source(#[from] crate::system::fs::SourceError),

    /// A labeled-stanza manifest had an unrecoverable structure problem.
    #[error("Stanza Config Error")]
    Cfg(#[from] crate::config::parsers::yaboot::cfg::CfgError),
}

//! Azure API client semantics for the provider extension
//!
//! The raw Azure SDK surface is abstracted as capability traits so the
//! semantics layered on top (waiting for long-running operations, tolerated
//! status codes) can be exercised without a subscription.

#![deny(missing_docs)]

pub mod error;
pub mod network_interface;

pub use error::{ClientError, Result};
pub use network_interface::{
    IpConfiguration, NetworkInterface, NetworkInterfaceApi, NetworkInterfaceClient,
    NetworkInterfaceProperties, OperationOutcome, PendingOperation,
};

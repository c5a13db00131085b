mod attach;
mod client;
mod container;
mod pod;
mod pod_ext;
mod stop;
mod wait;

pub use attach::*;
pub use client::*;
pub use container::*;
pub use pod::*;
pub use stop::*;
pub use wait::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("field not found in struct: {0}")]
    FieldNotFound(String),

    #[error("container not found ({0})")]
    ContainerNotFound(String),

    #[error("pod not found: {0}")]
    PodNotFound(String),

    #[error("pod deleted while waiting for it to run: {0}")]
    PodDeleted(String),

    #[error("pod terminated before it was running: {0}")]
    PodTerminated(String),

    #[error("timed out waiting for pod to run: {0}")]
    WaitTimeout(String),

    #[error("attach failed: {0}")]
    AttachFailed(String),
}

// Helpers for reading the bits of a pod we care about
pub trait PodExt {
    fn namespaced_name(&self) -> String;
    fn spec(&self) -> anyhow::Result<&corev1::PodSpec>;
    fn phase(&self) -> Option<&str>;
}

#[cfg(test)]
pub mod tests;

//! Device fingerprinting. The core treats the fingerprint as an opaque token
//! from a [`FingerprintSource`]; [`HostFingerprint`] is the default source for
//! the command-line client. Fingerprints are computed per attempt and never
//! cached.

use super::types::DeviceFingerprint;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("fingerprint unavailable: {0}")]
pub struct FingerprintError(pub String);

#[async_trait]
pub trait FingerprintSource: Send + Sync {
    /// Produces the device identifier for this attempt. No timeout is applied
    /// by callers.
    async fn fingerprint(&self) -> Result<DeviceFingerprint, FingerprintError>;
}

/// UUIDv5 over host name, OS, architecture and user name: stable for one
/// account on one machine, different across machines.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostFingerprint;

impl HostFingerprint {
    fn components() -> Result<Vec<String>, FingerprintError> {
        let hostname = whoami::fallible::hostname()
            .map_err(|err| FingerprintError(format!("host name: {err}")))?;

        Ok(vec![
            hostname,
            std::env::consts::OS.to_string(),
            std::env::consts::ARCH.to_string(),
            whoami::username(),
        ])
    }
}

#[async_trait]
impl FingerprintSource for HostFingerprint {
    async fn fingerprint(&self) -> Result<DeviceFingerprint, FingerprintError> {
        let components = tokio::task::spawn_blocking(Self::components)
            .await
            .map_err(|err| FingerprintError(format!("fingerprint task failed: {err}")))??;

        Ok(fingerprint_from(&components))
    }
}

fn fingerprint_from(components: &[String]) -> DeviceFingerprint {
    let material = components.join("\u{1f}");
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, material.as_bytes());
    DeviceFingerprint::new(id.simple().to_string())
}

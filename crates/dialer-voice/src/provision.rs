//! SIP outbound trunk provisioning.
//!
//! Reuses the first trunk the platform lists. Only when the listing is empty
//! is a new trunk created, and only then is its ID written to the config
//! file under `SIP_OUTBOUND_TRUNK_ID`.

use crate::env_file::EnvFile;
use crate::error::VoiceError;
use crate::platform::PlatformApi;
use dialer_types::{TrunkDescriptor, TrunkSpec, TRUNK_ID_KEY};
use tracing::{error, info, warn};

/// Result of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub trunk: TrunkDescriptor,
    /// True if the trunk was created by this run rather than reused.
    pub created: bool,
    /// True if the trunk ID was written to the config file by this run.
    pub persisted: bool,
}

impl Provisioned {
    pub fn trunk_id(&self) -> &str {
        &self.trunk.sip_trunk_id
    }
}

pub struct TrunkProvisioner<'a> {
    platform: &'a dyn PlatformApi,
    env_file: &'a EnvFile,
}

impl<'a> TrunkProvisioner<'a> {
    pub fn new(platform: &'a dyn PlatformApi, env_file: &'a EnvFile) -> Self {
        Self { platform, env_file }
    }

    /// Lists outbound trunks. A failed listing is logged and reported as empty.
    pub async fn existing_trunks(&self) -> Vec<TrunkDescriptor> {
        match self.platform.list_outbound_trunks().await {
            Ok(trunks) => {
                info!(count = trunks.len(), "listed outbound trunks");
                trunks
            }
            Err(e) => {
                warn!(error = %e, "failed to list outbound trunks");
                Vec::new()
            }
        }
    }

    /// Returns an existing trunk or creates one from `spec`.
    pub async fn ensure_trunk(&self, spec: &TrunkSpec) -> Result<Provisioned, VoiceError> {
        if let Some(trunk) = self.existing_trunks().await.into_iter().next() {
            info!(trunk_id = %trunk.sip_trunk_id, "using existing trunk");
            return Ok(Provisioned {
                trunk,
                created: false,
                persisted: false,
            });
        }

        info!(name = %spec.name, address = %spec.address, "creating outbound trunk");
        let trunk = self.platform.create_outbound_trunk(spec).await.map_err(|e| {
            error!(error = %e, "failed to create outbound trunk");
            e
        })?;
        info!(trunk_id = %trunk.sip_trunk_id, "created outbound trunk");

        // The trunk exists remotely either way; a later run finds it by listing.
        let persisted = match self.env_file.upsert(TRUNK_ID_KEY, &trunk.sip_trunk_id) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    error = %e,
                    path = %self.env_file.path().display(),
                    "failed to persist trunk id"
                );
                false
            }
        };

        Ok(Provisioned {
            trunk,
            created: true,
            persisted,
        })
    }
}

//! Preconditions checked before a run validates or uploads anything.

use tracing::{debug, warn};

use genie_model::{GenieError, Result};
use genie_remote::{RemoteClient, RemoteError};

/// Reported for any destination that cannot receive the upload.
pub const PARENT_ERROR: &str = "Provided Synapse id must be your input folder Synapse id \
     or a Synapse Id of a folder inside your input directory";

/// Check that `parent_id` can be read and can hold children.
///
/// An unreadable or missing entity is [`GenieError::PermissionDenied`]; a
/// readable entity that is not a container is [`GenieError::InvalidTarget`].
/// Transport failures propagate unchanged.
pub fn check_parent_permission_container(client: &dyn RemoteClient, parent_id: &str) -> Result<()> {
    let entity = match client.fetch(parent_id) {
        Ok(entity) => entity,
        Err(error @ (RemoteError::Forbidden(_) | RemoteError::NotFound(_))) => {
            warn!(parent_id, %error, "destination rejected");
            return Err(GenieError::PermissionDenied(PARENT_ERROR.to_string()));
        }
        Err(error) => return Err(error.into()),
    };
    if !entity.is_container() {
        warn!(parent_id, kind = entity.kind.as_str(), "destination is not a container");
        return Err(GenieError::InvalidTarget(PARENT_ERROR.to_string()));
    }
    debug!(parent_id, "destination accepted");
    Ok(())
}

/// Check that `center` is one of `valid_centers`.
pub fn check_center_input(center: &str, valid_centers: &[String]) -> Result<()> {
    if valid_centers.iter().any(|valid| valid == center) {
        return Ok(());
    }
    Err(GenieError::InvalidArgument(format!(
        "Must specify one of these centers: {}",
        valid_centers.join(", ")
    )))
}

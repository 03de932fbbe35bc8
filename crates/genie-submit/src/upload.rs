use std::path::Path;

use tracing::{info, warn};

use genie_model::{Entity, NewEntity, Result};
use genie_remote::RemoteClient;

/// Store each of `paths` under `parent_id` when the submission is valid.
///
/// Invalid submissions are never uploaded and return no entities. Paths are
/// stored one at a time; a failure stops at that path and leaves earlier
/// uploads in place.
pub fn upload_to_synapse<P: AsRef<Path>>(
    client: &dyn RemoteClient,
    paths: &[P],
    is_valid: bool,
    parent_id: &str,
) -> Result<Vec<Entity>> {
    if !is_valid {
        warn!(parent_id, files = paths.len(), "submission invalid; nothing uploaded");
        return Ok(Vec::new());
    }

    let mut stored = Vec::with_capacity(paths.len());
    for path in paths {
        let entity = client.store(NewEntity::file(path, parent_id))?;
        info!(id = %entity.id, name = %entity.name, parent_id, "uploaded");
        stored.push(entity);
    }
    Ok(stored)
}

//! One validation run, from argument checks to upload.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, info_span};

use genie_model::{Entity, Result, SubmissionUnit};
use genie_remote::RemoteClient;
use genie_validate::{GenieValidationHelper, LoadPolicy, PackageCatalog, collect_format_types};

use crate::guard::{check_center_input, check_parent_permission_container};
use crate::resolver::{LocationMap, resolve_oncotree_link};
use crate::upload::upload_to_synapse;

/// Parameters of a run, already parsed by the caller.
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    pub center: String,
    /// Skip filename probing and use this file type.
    pub file_type: Option<String>,
    /// Explicit upload destination.
    pub parent_id: Option<String>,
    pub oncotree_link: Option<String>,
    pub nosymbol_check: bool,
    pub file_paths: Vec<PathBuf>,
    pub project_id: String,
    pub format_registry_packages: Vec<String>,
    pub load_policy: LoadPolicy,
    /// Upload to the center's input folder when no explicit destination is given.
    pub upload_to_center_input: bool,
}

/// What a run decided and stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub center: String,
    pub file_type: Option<String>,
    pub valid: bool,
    pub message: String,
    /// Where the files were uploaded, if anywhere.
    pub destination: Option<String>,
    pub stored: Vec<Entity>,
}

/// Validate a center's submission and upload it if valid.
///
/// Steps run strictly in order, and any failure aborts the rest:
/// 1. guard the explicit destination
/// 2. load the location mapping and check the center
/// 3. resolve and guard the center input folder, when uploading there
/// 4. resolve the oncotree link
/// 5. build the format registry and validate
/// 6. upload to the destination
///
/// A submission that fails validation is an `Ok` summary with `valid ==
/// false`; `Err` means the run could not complete.
pub fn perform_validate(
    client: &dyn RemoteClient,
    catalog: &PackageCatalog,
    args: &ValidateArgs,
) -> Result<RunSummary> {
    let span = info_span!("validate", center = %args.center);
    let _guard = span.enter();

    if let Some(parent_id) = &args.parent_id {
        check_parent_permission_container(client, parent_id)?;
    }

    let map = LocationMap::load(client, &args.project_id)?;
    check_center_input(&args.center, &map.centers())?;
    let destination = match &args.parent_id {
        Some(parent_id) => Some(parent_id.clone()),
        None if args.upload_to_center_input => {
            let input_id = map.resolve_center_input(&args.center)?;
            check_parent_permission_container(client, input_id)?;
            Some(input_id.to_string())
        }
        None => None,
    };
    let oncotree_link = resolve_oncotree_link(client, &map, args.oncotree_link.as_deref())?;

    let registry = collect_format_types(catalog, &args.format_registry_packages, args.load_policy)?;
    let unit = SubmissionUnit::from_paths(&args.file_paths)?;
    let mut helper = GenieValidationHelper::new(
        client,
        Some(args.project_id.clone()),
        &args.center,
        unit,
        registry,
    )
    .with_file_type(args.file_type.clone());
    let outcome = helper.validate_single_file(oncotree_link.as_deref(), args.nosymbol_check)?;
    let file_type = helper.file_type().map(str::to_string);

    let stored = match &destination {
        Some(parent_id) => upload_to_synapse(client, &args.file_paths, outcome.valid, parent_id)?,
        None => {
            info!("no upload destination; validated locally only");
            Vec::new()
        }
    };

    info!(
        file_type = file_type.as_deref().unwrap_or("unknown"),
        valid = outcome.valid,
        uploaded = stored.len(),
        "run finished"
    );
    Ok(RunSummary {
        center: args.center.clone(),
        file_type,
        valid: outcome.valid,
        message: outcome.message,
        destination,
        stored,
    })
}

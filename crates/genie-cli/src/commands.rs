use anyhow::{Context, Result};
use tracing::info;

use genie_cli::config::GenieConfig;
use genie_cli::summary::{apply_table_style, formats_table};
use genie_formats::builtin_catalog;
use genie_remote::LocalStore;
use genie_submit::{RunSummary, ValidateArgs, perform_validate};
use genie_validate::{LoadPolicy, collect_format_types};

use crate::cli::{FormatsCommand, PackageArgs, ValidateCommand};

fn load_policy(args: &PackageArgs, config: &GenieConfig) -> LoadPolicy {
    if args.skip_missing_packages {
        LoadPolicy::SkipMissing
    } else {
        config.load_policy()
    }
}

pub fn run_validate(args: &ValidateCommand, config: &GenieConfig) -> Result<RunSummary> {
    let store_root = config.store(args.store.as_deref());
    let store = LocalStore::open(&store_root)
        .with_context(|| format!("open store {}", store_root.display()))?;

    let validate_args = ValidateArgs {
        center: args.center.clone(),
        file_type: args.filetype.clone(),
        parent_id: args.parentid.clone(),
        oncotree_link: args.oncotree_link.clone(),
        nosymbol_check: args.nosymbol_check,
        file_paths: args.files.clone(),
        project_id: config.project_id(args.project_id.as_deref())?,
        format_registry_packages: config.packages(&args.packages.format_registry_packages),
        load_policy: load_policy(&args.packages, config),
        upload_to_center_input: args.upload_to_center_input,
    };
    info!(
        store = %store_root.display(),
        packages = ?validate_args.format_registry_packages,
        "starting validation"
    );
    perform_validate(&store, &builtin_catalog(), &validate_args)
        .with_context(|| format!("validate submission for center {}", args.center))
}

pub fn run_formats(args: &FormatsCommand, config: &GenieConfig) -> Result<()> {
    let catalog = builtin_catalog();
    let packages = config.packages(&args.packages.format_registry_packages);
    let registry = collect_format_types(&catalog, &packages, load_policy(&args.packages, config))
        .context("build format registry")?;
    println!("{}", formats_table(&registry));

    let mut available = comfy_table::Table::new();
    available.set_header(vec!["Available packages"]);
    apply_table_style(&mut available);
    for name in catalog.names() {
        available.add_row(vec![name]);
    }
    println!("{available}");
    Ok(())
}

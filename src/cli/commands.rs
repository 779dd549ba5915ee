//! Command implementations

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{render_records, ApplicationError, ParentageGuard};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{HierarchyBuilder, LevelConfig, OrphanPolicy, Record, RecordKey, TreeDisplay};
use crate::infrastructure::{HtmlTagBuilder, InMemoryRecordStore, RecordStore};

/// Dispatch the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Render {
            records,
            menu_id,
            template,
            promote_orphans,
        } => render(
            cli.config.as_deref(),
            records,
            menu_id.as_deref(),
            template.as_deref(),
            *promote_orphans,
        ),
        Commands::Tree { records, label } => tree(cli.config.as_deref(), records, label.as_deref()),
        Commands::CheckParent {
            records,
            id,
            parent,
        } => check_parent(cli.config.as_deref(), records, id, parent),
        Commands::Delete { records, id } => delete(cli.config.as_deref(), records, id),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_store(settings: &Settings, records: &Path) -> CliResult<InMemoryRecordStore> {
    Ok(InMemoryRecordStore::load(
        records,
        settings.menu.fields.clone(),
    )?)
}

#[instrument(level = "debug")]
fn render(
    config: Option<&Path>,
    records: &Path,
    menu_id: Option<&str>,
    template: Option<&str>,
    promote_orphans: bool,
) -> CliResult<()> {
    let mut settings = Settings::load(config)?;
    if let Some(id) = menu_id {
        settings.menu.menu_id = Some(id.to_string());
    }
    if let Some(t) = template {
        settings.menu.item_template = Some(LevelConfig::Constant(t.to_string()));
    }
    if promote_orphans {
        settings.menu.orphans = OrphanPolicy::PromoteToRoot;
    }

    let store = load_store(&settings, records)?;
    let markup = render_records(
        store.records()?,
        &settings.menu,
        &settings.template_renderer(),
        &HtmlTagBuilder,
    )?;
    output::info(&markup);
    Ok(())
}

#[instrument(level = "debug")]
fn tree(config: Option<&Path>, records: &Path, label: Option<&str>) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let store = load_store(&settings, records)?;
    let forest = HierarchyBuilder::new(settings.menu.fields.clone())
        .with_orphans(settings.menu.orphans)
        .build(store.records()?)?;

    let tree = forest.to_tree(&records.display().to_string(), |node| {
        match label.and_then(|field| node.record().field(field)) {
            Some(value) => format!("{} {}", node.id(), value),
            None => node.id().to_string(),
        }
    });
    output::info(&tree);

    let dropped = forest.dropped();
    if !dropped.is_empty() {
        let ids: Vec<String> = dropped.iter().map(|n| n.id().to_string()).collect();
        output::warning(&format!(
            "{} record(s) not reachable from a root: {}",
            dropped.len(),
            ids.join(", ")
        ));
    }
    Ok(())
}

#[instrument(level = "debug")]
fn check_parent(config: Option<&Path>, records: &Path, id: &str, parent: &str) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let store = Arc::new(load_store(&settings, records)?);
    let id_key = RecordKey::parse(id);
    let candidate = store
        .find_by_id(&id_key)?
        .ok_or_else(|| ApplicationError::RecordNotFound(id_key.clone()))?;

    let guard = ParentageGuard::new(store, settings.menu.fields.clone());
    if guard.validate_new_parent(&candidate, &RecordKey::parse(parent))? {
        output::success(&format!("{} may become the parent of {}", parent, id));
        Ok(())
    } else {
        Err(CliError::ParentRejected {
            id: id.to_string(),
            parent: parent.to_string(),
        })
    }
}

#[instrument(level = "debug")]
fn delete(config: Option<&Path>, records: &Path, id: &str) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let store = Arc::new(load_store(&settings, records)?);
    let id_key = RecordKey::parse(id);
    let deleted = store
        .find_by_id(&id_key)?
        .ok_or_else(|| ApplicationError::RecordNotFound(id_key.clone()))?;

    let guard = ParentageGuard::new(Arc::clone(&store), settings.menu.fields.clone());
    let reparented = guard.reparent_children_on_delete(&deleted)?;
    store.remove(&id_key)?;
    store.save(records)?;
    debug!(reparented, "record deleted");

    output::action("Deleted", &id);
    output::detail(&format!("{} child record(s) reparented", reparented));
    Ok(())
}

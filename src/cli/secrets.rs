//! Secrets command - inspect the secret store without revealing values.

use std::path::Path;

use serde::Serialize;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::store::SecretStore;
use crate::error::Result;

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    reserved: bool,
}

/// List secret names, marking the ones distribution skips.
pub fn list(config: Option<&Path>, json: bool) -> Result<()> {
    let ctx = Context::load(config)?;
    let store = ctx.store();
    let names = store.list_secret_names()?;
    let settings = &ctx.config.distribution;

    if json {
        let entries: Vec<Entry> = names
            .iter()
            .map(|name| Entry {
                name,
                reserved: settings.is_reserved(name),
            })
            .collect();
        output::data(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if names.is_empty() {
        output::dimmed(&format!("no secrets in {}", store.location()));
        output::hint("next: keyfleet provision <KEY_NAME>");
        return Ok(());
    }

    output::header(&format!("{} ({})", store.location(), output::count(names.len())));
    for name in &names {
        if settings.is_reserved(name) {
            output::list_item(&format!("{} (reserved)", name));
        } else {
            output::list_item(&output::name(name));
        }
    }
    Ok(())
}

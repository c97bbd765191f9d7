//! `messages`: list the effective message catalog.

use serde::Serialize;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::config::{self, Presentation};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Serialize, Tabled)]
struct MessageRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Overridden")]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    overridden: bool,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let presentation = Presentation::resolve(global, &cfg);

    let catalog = cfg.catalog();
    let rows: Vec<MessageRow> = catalog
        .entries()
        .into_iter()
        .map(|(key, template)| {
            let name: &str = key.as_ref();
            MessageRow {
                key: name.to_owned(),
                template: template.to_owned(),
                overridden: cfg.messages.contains_key(name),
            }
        })
        .collect();

    let out = output::render_list(
        presentation.output,
        &rows,
        MessageRow::clone,
        |r| r.key.clone(),
    )?;
    output::print_output(&out, presentation.quiet);
    Ok(())
}

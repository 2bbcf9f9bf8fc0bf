//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, JobLogCommands, OutputFormat, PagingArgs};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::output::{CsvExporter, Table};
use crate::service::{IbpClient, KeyFigureQuery, KeyFigureService, MasterDataQuery};
use crate::types::Record;
use serde_json::json;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = IbpClient::new(config)?;

        let records = match &self.cli.command {
            Commands::MasterData {
                master_data_type,
                select,
                planning_area,
                version_id,
                version_name,
                query,
                paging,
            } => {
                let query = with_paging(
                    MasterDataQuery {
                        master_data_type: master_data_type.clone(),
                        select: select.clone(),
                        planning_area_id: planning_area.clone(),
                        version_id: version_id.clone(),
                        version_name: version_name.clone(),
                        options: query.to_options(),
                        ..MasterDataQuery::default()
                    },
                    paging,
                );
                client.master_data(&query).await?.into_records()
            }
            Commands::KeyFigures {
                planning_area,
                master_data,
                key_figures,
                module,
                query,
                paging,
            } => {
                let mut kf = KeyFigureQuery::new(planning_area, master_data, key_figures)
                    .service(KeyFigureService::from_module(*module)?)
                    .options(query.to_options());
                kf.page_size = paging.page_size;
                kf.total_records = paging.total_records;
                client.key_figures(&kf).await?.into_records()
            }
            Commands::Telemetry { view } => client.telemetry(*view).await?,
            Commands::JobLogs { command } => {
                let log_view = client.log_view()?;
                match command {
                    JobLogCommands::EntitySets => log_view
                        .entity_sets()
                        .await?
                        .into_iter()
                        .map(|name| entity_set_record(&name))
                        .collect(),
                    JobLogCommands::Read {
                        entity_set,
                        select,
                        top,
                        query,
                    } => {
                        let mut options = query.to_options();
                        options.select.clone_from(select);
                        options.top = *top;
                        log_view.entity_data(entity_set, &options).await?
                    }
                }
            }
        };

        info!(records = records.len(), "Read complete");
        self.emit(client.config(), &records)
    }

    /// Load configuration: file, then environment, then command-line flags
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.apply_env();

        if let Some(host) = &self.cli.host {
            config.host.clone_from(host);
        }
        if let Some(username) = &self.cli.username {
            config.username.clone_from(username);
        }
        Ok(config)
    }

    /// Write records in the selected format
    fn emit(&self, config: &ClientConfig, records: &[Record]) -> Result<()> {
        if self.cli.format == OutputFormat::Csv {
            if self.cli.strict {
                Table::from_records(records, true)?;
            }
            let exporter = CsvExporter::new(config.export.clone());
            let path = match &self.cli.output {
                Some(path) => {
                    exporter.export_to(records, path)?;
                    path.clone()
                }
                None => exporter.export(records)?,
            };
            eprintln!("Wrote {} records to {}", records.len(), path.display());
            return Ok(());
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_records(self.cli.format, records, self.cli.strict, &mut out)
    }
}

fn with_paging(mut query: MasterDataQuery, paging: &PagingArgs) -> MasterDataQuery {
    query.page_size = paging.page_size;
    query.total_records = paging.total_records;
    query
}

fn entity_set_record(name: &str) -> Record {
    let mut record = Record::new();
    record.insert("EntitySetName".to_string(), json!(name));
    record
}

/// Write records to `out` as JSON lines, a text table or CSV.
///
/// With `strict` set, records with differing field sets are rejected before
/// anything is written.
pub fn write_records<W: Write>(
    format: OutputFormat,
    records: &[Record],
    strict: bool,
    out: &mut W,
) -> Result<()> {
    let table = Table::from_records(records, strict)?;

    match format {
        OutputFormat::Json => {
            for record in records {
                let line = serde_json::to_string(record)
                    .map_err(|e| Error::json(format!("Failed to serialize record: {e}")))?;
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Pretty => {
            write!(out, "{}", table.render_pretty())?;
            writeln!(out, "({} records)", table.len())?;
        }
        OutputFormat::Csv => table.write_csv(&mut *out)?,
    }

    out.flush()?;
    Ok(())
}

//! Command execution.
//!
//! Output goes to the supplied writer as pretty-printed JSON. Replies that
//! carry only a status print `status: <code>`.

use std::error::Error;
use std::io::Write;

use hbase_rest_client::{ColumnRef, GatewayClient, GatewayReply, StatusCode};
use serde::Serialize;

use crate::cli::Command;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Read-path settings resolved from config and flags.
#[derive(Debug, Clone, Copy)]
pub struct ReadSettings {
    pub decode: bool,
    pub scan_batch: u32,
}

const DEMO_TABLE: &str = "user";
const DEMO_FAMILY: &str = "userinfo";

pub async fn run(
    client: &GatewayClient,
    command: Command,
    read: ReadSettings,
    out: &mut impl Write,
) -> CommandResult {
    match command {
        Command::Version => write_json(out, &client.cluster_version().await?),
        Command::Status => write_json(out, &client.cluster_status().await?),
        Command::List => write_json(out, &client.table_list().await?),
        Command::Schema { table } => write_reply(out, client.table_schema(&table).await?),
        Command::Create { table, families } => {
            write_status(out, client.create_table(&table, &families).await?)
        }
        Command::Drop { table } => write_status(out, client.drop_table(&table).await?),
        Command::Put {
            table,
            family,
            column,
            row,
            value,
        } => write_status(
            out,
            client.put(&table, &family, &column, &row, &value).await?,
        ),
        Command::Get { table, row, column } => {
            let column = match column.as_deref() {
                Some(spec) => Some(ColumnRef::parse(spec).ok_or_else(|| {
                    format!("Invalid column '{}', expected family:qualifier", spec)
                })?),
                None => None,
            };
            write_reply(out, client.get(&table, &row, column, read.decode).await?)
        }
        Command::Scan { table, limit } => {
            let limit = limit.unwrap_or(read.scan_batch);
            write_reply(out, client.scan(&table, limit, read.decode).await?)
        }
        Command::Demo => demo(client, read, out).await,
    }
}

/// Walk through every gateway operation against a scratch `user` table.
async fn demo(client: &GatewayClient, read: ReadSettings, out: &mut impl Write) -> CommandResult {
    let version = client.cluster_version().await?;
    writeln!(out, "cluster version: {}", version.version)?;

    let status = client.cluster_status().await?;
    writeln!(
        out,
        "cluster status: {} live node(s), {} dead, {} region(s)",
        status.live_nodes.len(),
        status.dead_nodes.len(),
        status.regions
    )?;

    let tables = client.table_list().await?;
    writeln!(out, "tables: {}", join(tables.names()))?;

    let created = client.create_table(DEMO_TABLE, &[DEMO_FAMILY]).await?;
    writeln!(out, "create table {}: {}", DEMO_TABLE, created.as_u16())?;

    let tables = client.table_list().await?;
    writeln!(out, "tables after create: {}", join(tables.names()))?;

    match client.table_schema(DEMO_TABLE).await? {
        GatewayReply::Data(schema) => writeln!(
            out,
            "schema of {}: {}",
            schema.name,
            schema.column_family_names().join(", ")
        )?,
        GatewayReply::Status(status) => {
            writeln!(out, "schema of {}: status {}", DEMO_TABLE, status.as_u16())?
        }
    }

    let cells = [
        ("phone", "0000001", "13800138000"),
        ("address", "0000001", "none"),
        ("phone", "0000002", "10086"),
    ];
    for (column, row, value) in cells {
        let status = client
            .put(DEMO_TABLE, DEMO_FAMILY, column, row, value)
            .await?;
        writeln!(
            out,
            "put {}/{}:{} = {}: {}",
            row,
            DEMO_FAMILY,
            column,
            value,
            status.as_u16()
        )?;
    }

    writeln!(out, "get row 0000001:")?;
    write_reply(out, client.get(DEMO_TABLE, "0000001", None, read.decode).await?)?;

    writeln!(out, "get 0000001/{}:phone:", DEMO_FAMILY)?;
    let phone = ColumnRef::new(DEMO_FAMILY, "phone");
    write_reply(
        out,
        client
            .get(DEMO_TABLE, "0000001", Some(phone), read.decode)
            .await?,
    )?;

    writeln!(out, "scan {}:", DEMO_TABLE)?;
    write_reply(
        out,
        client
            .scan(DEMO_TABLE, read.scan_batch, read.decode)
            .await?,
    )?;

    let dropped = client.drop_table(DEMO_TABLE).await?;
    writeln!(out, "drop table {}: {}", DEMO_TABLE, dropped.as_u16())?;

    let tables = client.table_list().await?;
    writeln!(out, "tables after drop: {}", join(tables.names()))?;
    Ok(())
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> CommandResult {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn write_status(out: &mut impl Write, status: StatusCode) -> CommandResult {
    writeln!(out, "status: {}", status.as_u16())?;
    Ok(())
}

fn write_reply<T: Serialize>(out: &mut impl Write, reply: GatewayReply<T>) -> CommandResult {
    match reply {
        GatewayReply::Data(data) => write_json(out, &data),
        GatewayReply::Status(status) => write_status(out, status),
    }
}

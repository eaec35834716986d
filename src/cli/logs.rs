//! Log search and submission commands

use std::io::BufRead;

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::{CommandContext, LimitArgs, OutputFormat, QueryArgs};
use crate::client::models::{
    ContentEncoding, HttpLogItem, Log, LogsListRequest, LogsQueryFilter, LogsStorageTier,
};
use crate::client::params::format_datetime;
use crate::client::{ListLogsParams, LogsApi, SubmitLogParams};
use crate::error::{Error, Result};
use crate::models::LogDisplay;
use crate::output::print_item;

/// Log subcommands
#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// Search logs
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            ddop log list -q 'service:web status:error'\n  \
            ddop log list --from 1h --index main,audit --limit 500\n  \
            ddop log list --storage-tier flex --from 7d --all --format json"
    )]
    List {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        limit: LimitArgs,

        /// Indexes to search, comma-separated (all indexes by default)
        #[arg(long = "index", value_delimiter = ',')]
        indexes: Vec<String>,

        /// Storage tier to search
        #[arg(long, value_enum)]
        storage_tier: Option<StorageTier>,
    },

    /// Send log lines to the logs intake
    #[command(after_help = "EXAMPLES:\n  \
            ddop log submit 'Deploy finished' --service checkout --tags env:prod,team:pay\n  \
            tail -n 100 app.log | ddop log submit - --source nginx --compress gzip")]
    Submit {
        /// Log message, or `-` to read one log per line from stdin
        message: String,

        /// Service name
        #[arg(long)]
        service: Option<String>,

        /// Integration the logs originate from (ddsource)
        #[arg(long)]
        source: Option<String>,

        /// Host name
        #[arg(long)]
        hostname: Option<String>,

        /// Tags, comma-separated (`env:prod,team:pay`)
        #[arg(long)]
        tags: Option<String>,

        /// Compress the payload
        #[arg(long, value_enum)]
        compress: Option<Compression>,
    },
}

/// Storage tiers accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageTier {
    Indexes,
    OnlineArchives,
    Flex,
}

impl From<StorageTier> for LogsStorageTier {
    fn from(tier: StorageTier) -> Self {
        match tier {
            StorageTier::Indexes => LogsStorageTier::Indexes,
            StorageTier::OnlineArchives => LogsStorageTier::OnlineArchives,
            StorageTier::Flex => LogsStorageTier::Flex,
        }
    }
}

/// Payload compressions accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    Gzip,
    Deflate,
}

impl From<Compression> for ContentEncoding {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Gzip => ContentEncoding::Gzip,
            Compression::Deflate => ContentEncoding::Deflate,
        }
    }
}

/// Attributes applied to every submitted line
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub service: Option<String>,
    pub source: Option<String>,
    pub hostname: Option<String>,
    pub tags: Option<String>,
    pub compress: Option<Compression>,
}

/// Run a log subcommand
pub async fn run(opts: &GlobalOptions, cmd: LogCommands) -> Result<()> {
    match cmd {
        LogCommands::List {
            query,
            limit,
            indexes,
            storage_tier,
        } => list(opts, &query, &limit, indexes, storage_tier).await,
        LogCommands::Submit {
            message,
            service,
            source,
            hostname,
            tags,
            compress,
        } => {
            let messages = if message == "-" {
                read_lines(std::io::stdin().lock())?
            } else {
                vec![message]
            };
            let submit = SubmitOptions {
                service,
                source,
                hostname,
                tags,
                compress,
            };
            let ctx = CommandContext::new(opts)?;
            let count = messages.len();
            let response = submit_logs(&ctx.client, messages, &submit).await?;
            match ctx.format {
                OutputFormat::Table => {
                    println!("{} Submitted {} log(s)", "✓".green(), count);
                    Ok(())
                }
                OutputFormat::Json => print_item(&response, &[], ctx.format),
            }
        }
    }
}

/// Run the log list command
pub async fn list(
    opts: &GlobalOptions,
    query: &QueryArgs,
    limit: &LimitArgs,
    indexes: Vec<String>,
    storage_tier: Option<StorageTier>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params = list_params(query, limit, ctx.page_size(), indexes, storage_tier)?;
    let stream = ctx.client.list_logs_with_pagination(params);
    print_listing::<Log, LogDisplay>(stream, limit.max_items(), "logs", ctx.format).await
}

/// Request body of a log search.
pub fn list_params(
    query: &QueryArgs,
    limit: &LimitArgs,
    preferred_page_size: usize,
    indexes: Vec<String>,
    storage_tier: Option<StorageTier>,
) -> Result<ListLogsParams> {
    let (from, to) = query.time_range()?;
    let filter = LogsQueryFilter {
        from: Some(format_datetime(&from)),
        to: to.as_ref().map(format_datetime),
        query: query.query.clone(),
        indexes: (!indexes.is_empty()).then_some(indexes),
        storage_tier: storage_tier.map(LogsStorageTier::from),
        ..Default::default()
    };
    let body = LogsListRequest::new()
        .filter(filter)
        .sort(query.sort.into())
        .page_limit(limit.page_size(preferred_page_size) as i32);
    Ok(ListLogsParams::new().body(body))
}

/// Build intake items and send them in one payload.
pub async fn submit_logs<C: LogsApi>(
    client: &C,
    messages: Vec<String>,
    options: &SubmitOptions,
) -> Result<serde_json::Value> {
    if messages.is_empty() {
        return Err(Error::Other("No log lines to submit".to_string()));
    }

    let items: Vec<HttpLogItem> = messages
        .into_iter()
        .map(|message| {
            let mut item = HttpLogItem::new(message);
            item.service = options.service.clone();
            item.ddsource = options.source.clone();
            item.hostname = options.hostname.clone();
            item
        })
        .collect();

    let mut params = SubmitLogParams::new();
    if let Some(tags) = &options.tags {
        params = params.ddtags(tags.clone());
    }
    if let Some(compress) = options.compress {
        params = params.content_encoding(compress.into());
    }

    debug!("Submitting {} log(s)", items.len());
    client.submit_log(items, params).await
}

/// Non-empty lines of `reader`.
fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

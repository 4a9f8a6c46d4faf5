//! Command-line definitions
//!
//! Every option can also come from the environment variable named next to
//! it. Boolean switches treat `0`, `false`, `no`, `off`, `n`, `f` and the
//! empty string as unset.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use hetzner_dns_core::types::{RecordLookup, RecordType, ZoneSelector};
use hetzner_dns_core::{MultiplicityPolicy, RecordFilter};
use hetzner_dns_provider::HETZNER_API_BASE;

#[derive(Debug, Parser)]
#[command(name = "hetzner-dns", author, version, about, long_about = None)]
pub struct Cli {
    /// Hetzner DNS API token
    #[arg(long, env = "HETZNER_DNS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, env = "HETZNER_DNS_API_URL", default_value = HETZNER_API_BASE, global = true)]
    pub api_url: String,

    /// Retries for transient failures (network, timeout, 429, 502-504)
    #[arg(long, env = "HETZNER_DNS_MAX_RETRIES", default_value_t = 0, global = true)]
    pub max_retries: u32,

    /// Log debug output to stderr (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage zones
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// Manage records
    #[command(subcommand)]
    Record(RecordCommand),
}

// ===== Zone commands =====

#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// List every zone in the account
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show one zone
    Get {
        #[command(flatten)]
        zone: ZoneTarget,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a zone
    Create {
        /// Domain name of the new zone
        #[arg(long, env = "NAME")]
        name: String,
        /// Default TTL in seconds [default: 86400]
        #[arg(long, env = "TTL")]
        ttl: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rename a zone or change its default TTL
    Update {
        #[command(flatten)]
        zone: ZoneTarget,
        /// New domain name
        #[arg(long, env = "NEW_NAME")]
        new_name: Option<String>,
        /// New default TTL in seconds
        #[arg(long, env = "TTL")]
        ttl: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete a zone and all of its records
    Delete {
        #[command(flatten)]
        zone: ZoneTarget,
    },
}

/// Exactly one zone, by id or by name.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ZoneTarget {
    /// Zone id
    #[arg(long, env = "ZONE_ID")]
    pub zone_id: Option<String>,
    /// Zone (domain) name
    #[arg(long, env = "ZONE_NAME")]
    pub zone_name: Option<String>,
}

impl ZoneTarget {
    pub fn selector(&self) -> anyhow::Result<ZoneSelector> {
        zone_selector(self.zone_id.as_deref(), self.zone_name.as_deref())
    }
}

// ===== Record commands =====

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// List the records of a zone (or of every zone), optionally filtered
    List {
        #[command(flatten)]
        scope: ZoneScope,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find records by id or by filter
    Get {
        #[command(flatten)]
        lookup: LookupArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a record
    Create {
        #[command(flatten)]
        scope: ZoneScope,
        /// Record type (A, AAAA, CNAME, MX, TXT, SRV, ...)
        #[arg(long = "type", env = "TYPE")]
        record_type: RecordType,
        /// Record name relative to the zone [default: @]
        #[arg(long, env = "NAME")]
        name: Option<String>,
        /// Record value; MX takes "<priority> <server>", SRV "<priority> <weight> <port> <target>"
        #[arg(long, env = "VALUE")]
        value: String,
        /// TTL in seconds [default: 86400]
        #[arg(long, env = "TTL")]
        ttl: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Update one record, found by id or by name
    Update {
        #[command(flatten)]
        lookup: LookupArgs,
        /// Name of the record to update
        #[arg(long, env = "NAME")]
        name: Option<String>,
        /// New record type
        #[arg(long = "type", env = "TYPE")]
        record_type: Option<RecordType>,
        /// New value
        #[arg(long, env = "VALUE")]
        value: Option<String>,
        /// New TTL in seconds
        #[arg(long, env = "TTL")]
        ttl: Option<u32>,
        /// New record name
        #[arg(long, env = "NEW_NAME")]
        new_name: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete records by id, by id list, or by filter
    Delete {
        #[command(flatten)]
        lookup: LookupArgs,
        /// Comma-separated record ids
        #[arg(long, env = "RECORD_IDS", value_delimiter = ',', conflicts_with = "record_id")]
        record_ids: Vec<String>,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Delete every matching record; without it a lookup matching several fails
        #[arg(long, env = "DELETE_MULTIPLE_RECORDS", value_parser = FalseyValueParser::new())]
        delete_multiple_records: bool,
    },
}

/// Zone bounding a record search. Id and name may both be given; they must
/// then name the same zone.
#[derive(Debug, Args)]
pub struct ZoneScope {
    /// Zone id
    #[arg(long, env = "ZONE_ID")]
    pub zone_id: Option<String>,
    /// Zone (domain) name
    #[arg(long, env = "ZONE_NAME")]
    pub zone_name: Option<String>,
    /// Search records across every zone in the account
    #[arg(long, env = "SEARCH_ALL_ZONES", value_parser = FalseyValueParser::new())]
    pub search_all_zones: bool,
}

impl ZoneScope {
    pub fn selector(&self) -> anyhow::Result<ZoneSelector> {
        zone_selector(self.zone_id.as_deref(), self.zone_name.as_deref())
    }
}

/// Direct record id, or the zone scope for an indirect lookup.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Record id; skips the lookup
    #[arg(long, env = "RECORD_ID")]
    pub record_id: Option<String>,
    #[command(flatten)]
    pub scope: ZoneScope,
}

impl LookupArgs {
    pub fn to_lookup(&self, filter: RecordFilter, policy: MultiplicityPolicy) -> RecordLookup {
        RecordLookup {
            record_id: self.record_id.clone(),
            zone_id: self.scope.zone_id.clone(),
            zone_name: self.scope.zone_name.clone(),
            filter,
            search_all_zones: self.scope.search_all_zones,
            policy,
        }
    }
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Match records with this name
    #[arg(long, env = "NAME")]
    pub name: Option<String>,
    /// Match records of this type
    #[arg(long = "type", env = "TYPE")]
    pub record_type: Option<RecordType>,
    /// Match records with this value
    #[arg(long, env = "VALUE")]
    pub value: Option<String>,
    /// Match records with this TTL
    #[arg(long, env = "TTL")]
    pub ttl: Option<u32>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            name: self.name.clone(),
            record_type: self.record_type.clone(),
            value: self.value.clone(),
            ttl: self.ttl,
        }
    }
}

#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Take the first match when several records match
    #[arg(long, env = "FIRST_RECORD_ONLY", value_parser = FalseyValueParser::new())]
    pub first_record_only: bool,
    /// Return every match when several records match
    #[arg(long, env = "ALLOW_MULTIPLE_RECORDS", value_parser = FalseyValueParser::new())]
    pub allow_multiple_records: bool,
}

impl PolicyArgs {
    pub fn policy(&self) -> anyhow::Result<MultiplicityPolicy> {
        Ok(MultiplicityPolicy::from_flags(
            self.first_record_only,
            self.allow_multiple_records,
        )?)
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print only ids
    #[arg(long, env = "ID_ONLY", value_parser = FalseyValueParser::new())]
    pub id_only: bool,
}

fn zone_selector(zone_id: Option<&str>, zone_name: Option<&str>) -> anyhow::Result<ZoneSelector> {
    match (zone_id, zone_name) {
        (Some(id), None) => Ok(ZoneSelector::Id(id.to_string())),
        (None, Some(name)) => Ok(ZoneSelector::Name(name.to_string())),
        (Some(_), Some(_)) => anyhow::bail!("Use either --zone-id or --zone-name, not both"),
        (None, None) => anyhow::bail!("Must include one of: --zone-id, --zone-name"),
    }
}

#[cfg(test)]
impl Cli {
    /// Parses `args` with every environment fallback removed, so the
    /// caller's shell cannot leak into the result.
    pub(crate) fn try_parse_args(args: &[&str]) -> Result<Self, clap::Error> {
        use clap::{CommandFactory, FromArgMatches};

        let matches = without_env(Self::command()).try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

#[cfg(test)]
fn without_env(cmd: clap::Command) -> clap::Command {
    let arg_ids: Vec<clap::Id> = cmd.get_arguments().map(|a| a.get_id().clone()).collect();
    let subcommands: Vec<String> = cmd
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect();

    let cmd = arg_ids
        .iter()
        .fold(cmd, |cmd, id| cmd.mut_arg(id, |arg| arg.env(None::<&str>)));
    subcommands
        .iter()
        .fold(cmd, |cmd, name| cmd.mut_subcommand(name, without_env))
}

use clap::{
    crate_authors, crate_description, crate_version, value_parser, Arg, ArgMatches, Command,
};
use snafu::ResultExt;
use std::env;
use std::io::Write;
use std::process::exit;

use raxclouddns::common::{DataSource, ErrorKind, Resource, ResponseSnafu, Result};
use raxclouddns::domain::{
    DomainConfig, DomainDataSource, DomainLookup, DomainResource, DEFAULT_DOMAIN_TTL,
};
use raxclouddns::record::{RecordConfig, RecordId, RecordResource};
use raxclouddns::session::{ClientVersions, Session};
use raxclouddns::{Provider, ProviderConfig};

const HOST_NAME: &str = "raxclouddns-cli";

fn syslog_level(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug => 7,
        log::Level::Trace => 7,
    }
}

fn setup_logger() {
    let filters = env::var("RUST_LOG").ok();

    // <3 Systemd support
    match env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let mut builder = env_logger::Builder::new();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    syslog_level(record.level()),
                    record.target(),
                    record.args()
                )
            });
            match &filters {
                Some(f) => builder.parse_filters(f),
                None => builder.filter_level(log::LevelFilter::Info),
            };
            builder.init();
        }
        _ => {
            let mut builder = pretty_env_logger::formatted_builder();
            match &filters {
                Some(f) => builder.parse_filters(f),
                None => builder.filter_level(log::LevelFilter::Info),
            };
            builder.init();
        }
    };
}

enum Action {
    Schema,
    Domain(DomainAction),
    Record(RecordAction),
}

enum DomainAction {
    Create(DomainConfig),
    Read(String),
    Update(String, DomainConfig),
    Delete(String),
    Import(String),
    Lookup(DomainLookup),
}

enum RecordAction {
    Create(RecordConfig),
    Read(RecordId),
    Update(RecordId, RecordConfig),
    Delete(RecordId),
    Import(String),
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Resource identifier")
}

fn domain_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("name")
            .long("name")
            .required(true)
            .help("Domain name"),
    )
    .arg(
        Arg::new("email")
            .long("email")
            .required(true)
            .help("Email address"),
    )
    .arg(
        Arg::new("ttl")
            .long("ttl")
            .value_parser(value_parser!(u32))
            .help("Time-To-Live (TTL) for the domain [default: 3600]"),
    )
    .arg(
        Arg::new("comment")
            .long("comment")
            .help("User specified comment"),
    )
}

fn record_args(cmd: Command, domain_required: bool) -> Command {
    cmd.arg(
        Arg::new("domain-id")
            .long("domain-id")
            .required(domain_required)
            .help("DNS domain where this record lives"),
    )
    .arg(
        Arg::new("name")
            .long("name")
            .required(true)
            .help("DNS record name"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .required(true)
            .help("DNS record type"),
    )
    .arg(
        Arg::new("data")
            .long("data")
            .required(true)
            .help("DNS record data"),
    )
    .arg(
        Arg::new("ttl")
            .long("ttl")
            .value_parser(value_parser!(u32))
            .help("Time-To-Live (TTL) for the record"),
    )
    .arg(
        Arg::new("priority")
            .long("priority")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .help("DNS record priority (MX and SRV only)"),
    )
    .arg(
        Arg::new("comment")
            .long("comment")
            .help("User specified comment"),
    )
}

fn command() -> Command {
    Command::new("raxclouddns")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Credentials are read from OS_AUTH_URL, OS_USERNAME and OS_PASSWORD.",
            "A password of the form @path is read from that file.",
        ))
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .subcommand_required(true)
        .arg(
            Arg::new("auth-url")
                .long("auth-url")
                .global(true)
                .help("The Identity authentication URL"),
        )
        .arg(
            Arg::new("user-name")
                .long("user-name")
                .global(true)
                .help("Username to login with"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .global(true)
                .help("Password to login with"),
        )
        .subcommand(Command::new("schema").about("Print the provider schema as JSON"))
        .subcommand(
            Command::new("domain")
                .about("Manage DNS domains")
                .subcommand_required(true)
                .subcommand(domain_args(Command::new("create").about("Create a domain")))
                .subcommand(Command::new("read").about("Read a domain").arg(id_arg()))
                .subcommand(domain_args(
                    Command::new("update").about("Update a domain").arg(id_arg()),
                ))
                .subcommand(Command::new("delete").about("Delete a domain").arg(id_arg()))
                .subcommand(
                    Command::new("import")
                        .about("Populate a domain's state from its ID")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("lookup")
                        .about("Find exactly one domain by name")
                        .arg(Arg::new("name").required(true).help("Domain name")),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Manage DNS records")
                .subcommand_required(true)
                .subcommand(record_args(
                    Command::new("create").about("Create a record"),
                    true,
                ))
                .subcommand(Command::new("read").about("Read a record").arg(id_arg()))
                .subcommand(record_args(
                    Command::new("update").about("Update a record").arg(id_arg()),
                    false,
                ))
                .subcommand(Command::new("delete").about("Delete a record").arg(id_arg()))
                .subcommand(
                    Command::new("import")
                        .about("Populate a record's state from its domain_id:record_id")
                        .arg(id_arg()),
                ),
        )
}

fn string(args: &ArgMatches, id: &str) -> String {
    args.get_one::<String>(id).cloned().unwrap_or_default()
}

fn domain_config(args: &ArgMatches) -> DomainConfig {
    DomainConfig {
        name: string(args, "name"),
        email: string(args, "email"),
        ttl: args
            .get_one::<u32>("ttl")
            .copied()
            .unwrap_or(DEFAULT_DOMAIN_TTL),
        comment: string(args, "comment"),
    }
}

fn record_config(args: &ArgMatches, id: Option<&RecordId>) -> RecordConfig {
    let domain_id = args
        .get_one::<String>("domain-id")
        .cloned()
        .or_else(|| id.map(|id| id.domain_id().to_string()))
        .unwrap_or_default();

    RecordConfig {
        domain_id,
        name: string(args, "name"),
        kind: string(args, "type"),
        data: string(args, "data"),
        ttl: args.get_one::<u32>("ttl").copied().unwrap_or(0),
        priority: args.get_one::<i64>("priority").copied().unwrap_or(0),
        comment: string(args, "comment"),
    }
}

fn parse_domain(args: &ArgMatches) -> DomainAction {
    match args.subcommand() {
        Some(("create", sub)) => DomainAction::Create(domain_config(sub)),
        Some(("read", sub)) => DomainAction::Read(string(sub, "id")),
        Some(("update", sub)) => DomainAction::Update(string(sub, "id"), domain_config(sub)),
        Some(("delete", sub)) => DomainAction::Delete(string(sub, "id")),
        Some(("import", sub)) => DomainAction::Import(string(sub, "id")),
        Some(("lookup", sub)) => DomainAction::Lookup(DomainLookup::new(string(sub, "name"))),
        other => unreachable!("unhandled domain subcommand {other:?}"),
    }
}

fn parse_record(args: &ArgMatches) -> Result<RecordAction> {
    Ok(match args.subcommand() {
        Some(("create", sub)) => RecordAction::Create(record_config(sub, None)),
        Some(("read", sub)) => RecordAction::Read(string(sub, "id").parse()?),
        Some(("update", sub)) => {
            let id: RecordId = string(sub, "id").parse()?;
            let config = record_config(sub, Some(&id));
            RecordAction::Update(id, config)
        }
        Some(("delete", sub)) => RecordAction::Delete(string(sub, "id").parse()?),
        Some(("import", sub)) => {
            let raw = string(sub, "id");
            raw.parse::<RecordId>()?;
            RecordAction::Import(raw)
        }
        other => unreachable!("unhandled record subcommand {other:?}"),
    })
}

/// Turns the command line into an action, rejecting malformed identifiers
/// before any credentials are used.
fn parse_action(args: &ArgMatches) -> Result<Action> {
    Ok(match args.subcommand() {
        Some(("schema", _)) => Action::Schema,
        Some(("domain", sub)) => Action::Domain(parse_domain(sub)),
        Some(("record", sub)) => Action::Record(parse_record(sub)?),
        other => unreachable!("unhandled subcommand {other:?}"),
    })
}

fn connect(args: &ArgMatches) -> Result<Session> {
    let config = ProviderConfig::from_env(
        args.get_one::<String>("auth-url").cloned(),
        args.get_one::<String>("user-name").cloned(),
        args.get_one::<String>("password").cloned(),
    )?;

    Provider::new(ClientVersions::new(HOST_NAME, crate_version!())).configure(config)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Option<String>> {
    serde_json::to_string_pretty(value)
        .boxed()
        .context(ResponseSnafu {
            message: "Failed to serialize state",
        })
        .map(Some)
}

fn run_domain(session: &Session, action: DomainAction) -> Result<Option<String>> {
    match action {
        DomainAction::Create(config) => to_json(&DomainResource::create(session, &config)?),
        DomainAction::Read(id) => to_json(&DomainResource::read(session, &id)?),
        DomainAction::Update(id, config) => {
            to_json(&DomainResource::update(session, &id, &config)?)
        }
        DomainAction::Delete(id) => DomainResource::delete(session, &id).map(|_| None),
        DomainAction::Import(id) => to_json(&DomainResource::import(session, &id)?),
        DomainAction::Lookup(query) => to_json(&DomainDataSource::read(session, &query)?),
    }
}

fn run_record(session: &Session, action: RecordAction) -> Result<Option<String>> {
    match action {
        RecordAction::Create(config) => to_json(&RecordResource::create(session, &config)?),
        RecordAction::Read(id) => to_json(&RecordResource::read(session, &id)?),
        RecordAction::Update(id, config) => {
            to_json(&RecordResource::update(session, &id, &config)?)
        }
        RecordAction::Delete(id) => RecordResource::delete(session, &id).map(|_| None),
        RecordAction::Import(id) => to_json(&RecordResource::import(session, &id)?),
    }
}

fn execute(args: &ArgMatches, action: Action) -> Result<Option<String>> {
    match action {
        Action::Schema => to_json(&Provider::schema()),
        Action::Domain(action) => run_domain(&connect(args)?, action),
        Action::Record(action) => run_record(&connect(args)?, action),
    }
}

pub(crate) fn main() {
    let args = command().get_matches();

    setup_logger();

    match parse_action(&args).and_then(|action| execute(&args, action)) {
        Ok(Some(output)) => println!("{output}"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("{err}");
            exit(match err.kind() {
                ErrorKind::Configuration => 2,
                _ => 1,
            });
        }
    }
}

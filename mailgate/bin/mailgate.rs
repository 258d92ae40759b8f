//! Command-line front end for mailgate
//!
//! - `domain`: check a domain name and whether it accepts mail
//! - `email`: validate one or more addresses
//! - `send`: compose a message from stdin and deliver it

#![deny(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::must_use_candidate)]

use std::{
    io::Read,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use mailgate::{
    Config,
    dns::HickoryResolver,
    mailer::{
        FailureSummary, Header, MailTransport, MailerConfig, MemoryTransport, MessageComposer,
    },
    validate::{DomainValidator, EmailValidator},
};

/// Validate recipients and send mail
#[derive(Parser, Debug)]
#[command(name = "mailgate")]
#[command(about = "Validate recipients and send mail", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a domain resolves and accepts mail
    Domain {
        /// Domain to check
        name: String,
    },
    /// Validate email addresses
    Email {
        /// Addresses to validate
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Send a message read from stdin
    Send(SendArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Sender address
    #[arg(long)]
    from: String,

    /// Comma separated recipients
    #[arg(long, default_value = "")]
    to: String,

    #[arg(long)]
    cc: Option<String>,

    #[arg(long)]
    bcc: Option<String>,

    #[arg(long)]
    reply_to: Option<String>,

    #[arg(short, long)]
    subject: Option<String>,

    /// Send even if some recipients were dropped
    #[arg(long)]
    partial: bool,

    /// Use the Cc list when no To recipient is valid
    #[arg(long)]
    cc_as_to: bool,

    /// Print the message instead of delivering it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    mailgate::common::logging::init();

    let cli = Cli::parse();
    let config = mailgate::load(cli.config.as_deref())?;
    let resolver = Arc::new(HickoryResolver::with_dns_config(&config.dns)?);

    match cli.command {
        Commands::Domain { name } => Ok(check_domain(resolver, &name)),
        Commands::Email { addresses } => Ok(check_emails(resolver, &addresses)),
        Commands::Send(args) => send(resolver, &config, &args),
    }
}

fn check_domain(resolver: Arc<HickoryResolver>, name: &str) -> ExitCode {
    let validator = DomainValidator::new(resolver);
    let result = validator.validate(name);
    let status = validator.server_status(name);

    println!(
        "{name}: {} ({}), {status} [{}]",
        result.outcome(),
        result.ip_or_unspecified(),
        status.code()
    );

    if result.is_resolvable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check_emails(resolver: Arc<HickoryResolver>, addresses: &[String]) -> ExitCode {
    let validator = EmailValidator::new(resolver);
    let mut all_valid = true;

    for address in addresses {
        let result = validator.validate(address);
        all_valid &= result.is_valid();

        if result.canonical().is_empty() {
            println!("{result} [{}]", result.outcome().code());
        } else {
            println!(
                "{result} -> {} ({}) [{}]",
                result.canonical(),
                result.ip_or_unspecified(),
                result.outcome().code()
            );
        }
    }

    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn send(
    resolver: Arc<HickoryResolver>,
    config: &Config,
    args: &SendArgs,
) -> anyhow::Result<ExitCode> {
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;

    if args.dry_run {
        let transport = MemoryTransport::new();
        let code = deliver(resolver, &transport, &config.mailer, args, &body)?;
        for message in transport.sent() {
            print!("{}", message.render());
        }
        Ok(code)
    } else {
        deliver(resolver, config.transport.build(), &config.mailer, args, &body)
    }
}

fn deliver<T: MailTransport>(
    resolver: Arc<HickoryResolver>,
    transport: T,
    config: &MailerConfig,
    args: &SendArgs,
    body: &str,
) -> anyhow::Result<ExitCode> {
    let mut composer =
        MessageComposer::new(resolver, transport, config).with_addresses(&args.from, &args.to);

    for (header, value) in [
        (Header::Cc, &args.cc),
        (Header::Bcc, &args.bcc),
        (Header::ReplyTo, &args.reply_to),
    ] {
        if let Some(value) = value {
            composer.set(header, value);
        }
    }

    if args.partial {
        composer.send_incomplete();
    }
    if args.cc_as_to {
        composer.use_cc_as_to();
    }

    print_failures(composer.summary());

    match composer.send(body, args.subject.as_deref()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is_not_ready() => {
            eprintln!("Message not sent: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn print_failures(summary: &FailureSummary) {
    for (header, results) in summary.iter() {
        for result in results {
            eprintln!("{}: dropped {result}", header.wire_name());
        }
    }
}

//! CLI wrapper for the kitbind dependency resolver.
//!
//! Usage:
//!   kitbind [--resources <dir>] <name>:<type>[=<value>]...
//!
//! Each argument names one dependency. Without `=<value>` the dependency is
//! resolved as if the configuration did not mention it. Set `RUST_LOG=debug`
//! to trace the resolution.

use kitbind::parser::ConfigParser;
use kitbind::runner::plugin::{
    DefaultObjectDependencyResolver, DependencyResult, DirectoryResourceLocator, ObjectDependencyResolver,
    ServiceRegistry,
};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

/// One dependency given on the command line.
struct DependencyArg {
    name: String,
    type_source: String,
    value: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let mut resources = String::from(".");
    let mut dependencies = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--resources" || arg == "-r" {
            match iter.next() {
                Some(dir) => resources = dir,
                None => {
                    eprintln!("Missing directory after '{}'", arg);
                    process::exit(1);
                }
            }
            continue;
        }
        match parse_dependency_arg(&arg) {
            Some(dependency) => dependencies.push(dependency),
            None => {
                eprintln!("Malformed dependency '{}', expected <name>:<type>[=<value>]", arg);
                process::exit(1);
            }
        }
    }

    let registry = ServiceRegistry::new();
    let resolver = DefaultObjectDependencyResolver::new(&registry, DirectoryResourceLocator::new(resources));

    let mut failed = false;
    for dependency in &dependencies {
        let ty = match ConfigParser::parse_type(&dependency.type_source) {
            Ok(ty) => ty,
            Err(e) => {
                eprintln!("{}: {}", dependency.name, e);
                failed = true;
                continue;
            }
        };

        match resolver.resolve_dependency(&dependency.name, &ty, dependency.value.as_deref()) {
            Ok(DependencyResult::Satisfied(value)) => println!("{}: {} = {}", dependency.name, ty, value),
            Ok(DependencyResult::Unsatisfied) => println!("{}: {} (unsatisfied)", dependency.name, ty),
            Err(e) => {
                eprintln!("{}: {}", dependency.name, e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

fn parse_dependency_arg(arg: &str) -> Option<DependencyArg> {
    let (name, rest) = arg.split_once(':')?;
    let (type_source, value) = match rest.split_once('=') {
        Some((ty, value)) => (ty, Some(value.to_string())),
        None => (rest, None),
    };
    Some(DependencyArg {
        name: name.to_string(),
        type_source: type_source.trim().to_string(),
        value,
    })
}

fn print_usage() {
    eprintln!("kitbind - component dependency resolver");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  kitbind [--resources <dir>] <name>:<type>[=<value>]...");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  kitbind retries:i32=3");
    eprintln!("  kitbind 'answer:enum YesNo {{ Yes, No }}=no'");
    eprintln!("  kitbind --resources ./plugin 'logo:image=Resources/logo.png'");
    eprintln!("  kitbind 'names:string[]=abc;def;ghi'");
}

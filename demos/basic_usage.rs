use error_levels::{LevelResolver, LevelSource, LogLevel, register_levels};
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
struct UpstreamTimeout {
    service: &'static str,
}

impl fmt::Display for UpstreamTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream '{}' timed out", self.service)
    }
}

impl Error for UpstreamTimeout {}

#[derive(Debug)]
struct LedgerCorruption;

impl fmt::Display for LedgerCorruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ledger checksum mismatch")
    }
}

impl Error for LedgerCorruption {}

fn build_resolver() -> LevelResolver {
    let mut resolver = LevelResolver::new();
    register_levels!(resolver, {
        UpstreamTimeout => |e| if e.service == "billing" { LogLevel::Error } else { LogLevel::Warning },
        LedgerCorruption => |_| LogLevel::Critical,
        io::Error => |e| match e.kind() {
            io::ErrorKind::PermissionDenied => LogLevel::Alert,
            _ => LogLevel::Error,
        },
    });
    resolver
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    let resolver = build_resolver();

    // 1. Typed resolution: the concrete type is known at the call site
    let timeout = UpstreamTimeout { service: "search" };
    println!("1. {} -> {}", timeout, resolver.resolve_level(&timeout));
    println!("   {} -> {}", LedgerCorruption, resolver.resolve_level(&LedgerCorruption));

    // 2. Unregistered types fall back to "error"
    println!("\n2. {} -> {}", fmt::Error, resolver.resolve_level(&fmt::Error));

    // 3. Erased errors, as returned by most application code
    let failures: Vec<Box<dyn Error + Send + Sync>> = vec![
        Box::new(UpstreamTimeout { service: "billing" }),
        Box::new(io::Error::from(io::ErrorKind::PermissionDenied)),
    ];
    println!("\n3. Erased errors:");
    for failure in &failures {
        println!("   {} -> {}", failure, resolver.resolve_error(&**failure));
    }

    // 4. Structured record for the logging pipeline
    println!("\n4. Resolution log:");
    resolver.resolve_with_log(&LedgerCorruption, |log| {
        if log.source() == LevelSource::Registered {
            println!("   {}", log);
        }
    });
}

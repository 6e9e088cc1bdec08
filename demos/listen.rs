//! Listens to all interesting input devices and prints the event names they produce.
//!
//! Usage: `listen [<device-pattern> [<lock-file>]]`. While `<lock-file>` exists, events are
//! dropped instead of printed.

use std::{
    env,
    error::Error,
    path::{Path, PathBuf},
    process,
};

use inputlayer::{Catalog, Config, ConnectionList, DevicePattern, Dispatcher, admit_all};

fn main() {
    env_logger::init();
    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("\nerror: {e}");
            let mut error: &dyn Error = &*e;
            while let Some(source) = error.source() {
                eprintln!("- caused by: {source}");
                error = source;
            }
            process::exit(1);
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let (pattern, lock_file) = match &*args {
        [] => (DevicePattern::default(), None),
        [pattern] => (pattern.parse::<DevicePattern>()?, None),
        [pattern, lock] => (pattern.parse::<DevicePattern>()?, Some(PathBuf::from(lock))),
        _ => {
            eprintln!(
                "usage: {} [<device-pattern> [<lock-file>]]",
                env!("CARGO_CRATE_NAME")
            );
            process::exit(1);
        }
    };

    let config = Config::default()
        .with_pattern(pattern)
        .with_event_logging(true);
    let catalog = Catalog::global();
    let mut conns = ConnectionList::new();

    let report = admit_all(config.pattern(), &mut conns, catalog);
    if report.is_failure() {
        return Err(format!("no devices matching '{}' could be opened", config.pattern()).into());
    }
    for conn in conns.iter() {
        println!("- {} ({}), fd {}", conn.path().display(), conn.name(), conn.fd());
    }

    let is_locked = || lock_file.as_deref().is_some_and(Path::exists);
    let mut dispatcher = Dispatcher::new(
        &config,
        catalog,
        |event: &str| println!("{event}"),
        is_locked,
    );
    while !conns.is_empty() {
        for fd in conns.wait_readable(None)? {
            dispatcher.process(&mut conns, fd)?;
        }
    }

    println!("all devices were removed");
    Ok(())
}

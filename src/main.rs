use std::path;
use std::process;

use clap::ArgEnum;
use env_logger;
use log;

use nway_merge::NWayMergerBuilder;

fn main() {
    let arg_parser = build_arg_parser();

    let log_level: LogLevel = arg_parser.value_of_t_or_exit("log_level");
    init_logger(log_level);

    let input = arg_parser.value_of("input").expect("value is required");
    let output = arg_parser.value_of("output").expect("value is required");
    let buf_size: Option<usize> = arg_parser
        .is_present("buf_size")
        .then(|| arg_parser.value_of_t_or_exit("buf_size"));

    let mut merger_builder = NWayMergerBuilder::new().with_sorted_check(arg_parser.is_present("check_sorted"));
    if let Some(buf_size) = buf_size {
        merger_builder = merger_builder.with_rw_buf_size(buf_size);
    }
    let merger = merger_builder.build();

    match merger.merge_paths(path::Path::new(input), path::Path::new(output)) {
        Ok(summary) => log::debug!("done: {:?}", summary),
        Err(err) => {
            log::error!("merging error: {}", err);
            process::exit(1);
        }
    }
}

#[derive(Copy, Clone, clap::ArgEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn possible_values() -> impl Iterator<Item = clap::PossibleValue<'static>> {
        Self::value_variants().iter().filter_map(|v| v.to_possible_value())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogLevel as clap::ArgEnum>::from_str(s, false)
    }
}

fn build_arg_parser() -> clap::ArgMatches {
    clap::App::new("nway-merge")
        .about("merges sorted integer lists into a single sorted list")
        .arg(
            clap::Arg::new("input")
                .short('i')
                .long("input")
                .help("file holding the lists to be merged ('-' for stdin)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("result file ('-' for stdout)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("log_level")
                .short('l')
                .long("loglevel")
                .help("logging level")
                .takes_value(true)
                .default_value("info")
                .possible_values(LogLevel::possible_values()),
        )
        .arg(
            clap::Arg::new("check_sorted")
                .long("check-sorted")
                .help("fail on input lists that are not sorted in ascending order"),
        )
        .arg(
            clap::Arg::new("buf_size")
                .short('b')
                .long("buf-size")
                .help("file read/write buffer size in bytes")
                .takes_value(true)
                .validator(|v| match v.parse::<usize>() {
                    Ok(0) => Err("Buffer size must be positive".to_string()),
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("Buffer size format incorrect: {}", err)),
                }),
        )
        .get_matches()
}

fn init_logger(log_level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(match log_level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        })
        .format_timestamp_millis()
        .init();
}

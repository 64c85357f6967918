use clap::{ArgMatches, Command};

use eland::error::ElandError;
use eland::io;
use eland::reasoner::classify_with_parse_time;
use eland_bin::config::{input_app, output_app, resource_type};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<(), ElandError> {
    env_logger::init();
    let matches = app("eland-classify").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &'static str) -> Command {
    output_app(input_app(
        Command::new(name)
            .version("0.1")
            .about("Classify an OWL 2 EL ontology"),
    ))
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), ElandError> {
    let input = matches
        .get_one::<String>("INPUT")
        .ok_or_else(|| ElandError::CommandError("A file name must be specified".to_string()))?;
    let path = Path::new(input);
    let typ = resource_type(matches, path)?;

    let parse_start = Instant::now();
    let file = File::open(path)?;
    let mut bufreader = BufReader::new(file);
    let ont = io::parse_read(&mut bufreader, typ)?;
    let parse_time = parse_start.elapsed();
    eprintln!(
        "Parsed {} terms, {} typedefs in {:?}",
        ont.terms.len(),
        ont.typedefs.len(),
        parse_time
    );

    let hierarchy = classify_with_parse_time(&ont, parse_time)?;
    let stats = &hierarchy.stats;
    eprintln!(
        "Classified {} concepts over {} roles: {} inferred subsumptions",
        stats.concept_count, stats.role_count, stats.inferred_subsumptions
    );
    eprintln!(
        "Times: normalize {}ms, saturate {}ms, reduce {}ms, total {}ms",
        stats.normalize_time_ms, stats.saturate_time_ms, stats.reduction_time_ms, stats.total_time_ms
    );

    let pretty = matches.get_flag("pretty");
    match matches.get_one::<String>("output") {
        Some(out) => {
            let file = File::create(out)?;
            io::json::write_hierarchy(file, &hierarchy, pretty)?;
        }
        None => {
            io::json::write_hierarchy(std::io::stdout().lock(), &hierarchy, pretty)?;
        }
    }

    Ok(())
}

use clap::{ArgMatches, Command};

use eland::error::ElandError;
use eland::io;
use eland_bin::config::{input_app, resource_type};
use eland_bin::summary::summarize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn main() -> Result<(), ElandError> {
    env_logger::init();
    let matches = app("eland-summary").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &'static str) -> Command {
    input_app(
        Command::new(name)
            .version("0.1")
            .about("Summarize the axiom content of an ontology"),
    )
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), ElandError> {
    let input = matches
        .get_one::<String>("INPUT")
        .ok_or_else(|| ElandError::CommandError("A file name must be specified".to_string()))?;
    let path = Path::new(input);
    let typ = resource_type(matches, path)?;

    let file = File::open(path)?;
    let mut bufreader = BufReader::new(file);
    let ont = io::parse_read(&mut bufreader, typ)?;

    if !ont.ontology.is_empty() {
        println!("Ontology: {}", ont.ontology);
    }
    if !ont.data_version.is_empty() {
        println!("Data version: {}", ont.data_version);
    }

    let s = summarize(&ont);
    println!("Terms: {} ({} obsolete)", s.term_count, s.obsolete_count);
    println!(
        "Typedefs: {} ({} transitive, {} reflexive)",
        s.typedef_count, s.transitive_count, s.reflexive_count
    );
    println!("Relationships: {}", s.relationship_count);
    println!("Intersection definitions: {}", s.intersection_count);
    println!("Relationship types:");
    for (rel_type, count) in s.with_relationship_types() {
        println!("\t{}: {}", rel_type, count);
    }

    Ok(())
}

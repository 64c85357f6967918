//! Support for eland command line programmes

pub mod config {
    use clap::{Arg, ArgAction, ArgMatches, Command};
    use eland::error::ElandError;
    use eland::io::{path_type, ResourceType};
    use std::path::Path;

    /// Adds the input-file and format arguments shared by every
    /// programme.
    pub fn input_app(app: Command) -> Command {
        app.arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .default_value("auto")
                .help("Input format: auto, obo or owl"),
        )
    }

    /// Adds the JSON output arguments.
    pub fn output_app(app: Command) -> Command {
        app.arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write JSON to FILE instead of stdout"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON output"),
        )
    }

    /// Resolves the input format from the `--format` flag, falling back
    /// to the file extension.
    pub fn resource_type(matches: &ArgMatches, path: &Path) -> Result<ResourceType, ElandError> {
        match matches.get_one::<String>("format").map(|s| s.as_str()) {
            None | Some("auto") => path_type(path).ok_or_else(|| {
                ElandError::CommandError(format!(
                    "Cannot detect the format of {:?}; use --format obo or --format owl",
                    path
                ))
            }),
            Some("obo") => Ok(ResourceType::Obo),
            Some("owl") => Ok(ResourceType::Owl),
            Some(other) => Err(ElandError::CommandError(format!(
                "Unknown format: {}",
                other
            ))),
        }
    }
}

pub mod summary {
    use eland::model::Ontology;
    use indexmap::map::IndexMap;

    #[derive(Debug)]
    pub struct SummaryStatistics {
        pub term_count: usize,
        pub obsolete_count: usize,
        pub typedef_count: usize,
        pub transitive_count: usize,
        pub reflexive_count: usize,
        pub relationship_count: usize,
        pub intersection_count: usize,
        pub relationship_types: IndexMap<String, usize>,
    }

    impl SummaryStatistics {
        pub fn with_relationship_types(&self) -> impl Iterator<Item = (&String, &usize)> + '_ {
            self.relationship_types.iter().filter(|&(_, v)| v > &0)
        }
    }

    pub fn summarize(ont: &Ontology) -> SummaryStatistics {
        let mut relationship_types = IndexMap::new();
        let mut relationship_count = 0;
        let mut intersection_count = 0;
        let mut obsolete_count = 0;

        for t in &ont.terms {
            if t.is_obsolete {
                obsolete_count += 1;
                continue;
            }
            relationship_count += t.relationships.len();
            if !t.intersection_of.is_empty() {
                intersection_count += 1;
            }
            for rel in &t.relationships {
                *relationship_types.entry(rel.rel_type.clone()).or_insert(0) += 1;
            }
        }

        SummaryStatistics {
            term_count: ont.terms.len(),
            obsolete_count,
            typedef_count: ont.typedefs.len(),
            transitive_count: ont.typedefs.iter().filter(|td| td.is_transitive).count(),
            reflexive_count: ont.typedefs.iter().filter(|td| td.is_reflexive).count(),
            relationship_count,
            intersection_count,
            relationship_types,
        }
    }

    #[cfg(test)]
    mod test {
        use super::*;
        use eland::model::{IntersectionPart, Term, TypeDef};

        #[test]
        fn test_summarize() {
            let ont = Ontology::new()
                .term(Term::new("A").is_a("B").relationship("has_part", "C"))
                .term(Term::new("B").obsolete())
                .term(
                    Term::new("C")
                        .is_a("B")
                        .intersection(IntersectionPart::genus("B")),
                )
                .typedef(TypeDef::new("has_part").transitive());

            let s = summarize(&ont);

            assert_eq!(s.term_count, 3);
            assert_eq!(s.obsolete_count, 1);
            assert_eq!(s.typedef_count, 1);
            assert_eq!(s.transitive_count, 1);
            assert_eq!(s.reflexive_count, 0);
            assert_eq!(s.relationship_count, 3);
            assert_eq!(s.intersection_count, 1);
            assert_eq!(s.relationship_types["is_a"], 2);
            assert_eq!(s.relationship_types["has_part"], 1);
            assert_eq!(s.with_relationship_types().count(), 2);
        }
    }
}

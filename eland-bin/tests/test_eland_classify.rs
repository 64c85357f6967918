use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

#[test]
fn integration_file_doesnt_exist() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("test/file/doesnt/exist.obo");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));

    Ok(())
}

#[test]
fn integration_unknown_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("tests/data/simple.obo").arg("--format").arg("bogus");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));

    Ok(())
}

#[test]
fn integration_classify_obo() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("tests/data/simple.obo");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"CHEBI:33839\""))
        .stdout(predicate::str::contains("\"direct_parents\":[\"CHEBI:25367\"]"))
        .stderr(predicate::str::contains("Classified 6 concepts"));

    Ok(())
}

#[test]
fn integration_obsolete_terms_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("tests/data/simple.obo");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CHEBI:99999").not());

    Ok(())
}

#[test]
fn integration_pretty_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("tests/data/simple.obo").arg("--pretty");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("  \"concepts\": ["));

    Ok(())
}

#[test]
fn integration_explicit_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("eland-classify")?;

    cmd.arg("tests/data/simple.obo").arg("--format").arg("obo");
    cmd.assert().success();

    Ok(())
}

#![cfg(feature = "dump")]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use ak8_report::{
    dump::write_dump,
    event::{Jet, Product, Subjet},
    report::{AK8_JETS, SOFT_DROP, SOFT_DROP_SUBJETS},
    Event,
};
use pretty_assertions::assert_eq;

const HEADER: &str = "   run       lumi     event     jet.pt   nSubJets  subjetPts";

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ak8-report"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin_path())
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn event(id: u64, subjet_pt: f64) -> Event {
    let jet = Jet::new(50.).with_subjets(SOFT_DROP, [Subjet::new(subjet_pt)]);
    Event::new(1, 1, id)
        .with_product(AK8_JETS, Product::Jets(vec![jet]))
        .with_product(SOFT_DROP_SUBJETS, Product::Subjets(vec![Subjet::new(subjet_pt); 2]))
}

fn write_events(path: &Path, events: &[Event]) {
    let file = File::create(path).unwrap();
    write_dump(file, events).unwrap();
}

#[test]
fn report_stops_before_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    write_events(
        &dir.path().join("events.jsonl"),
        &[event(1, 7.5), event(2, 7.5), event(2403, 7.5)],
    );

    let out = run(dir.path(), &["-i", "events.jsonl"]);
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        [
            HEADER,
            "     1          1         1     50.000      1.000 [7.5]",
            "     1          1         2     50.000      1.000 [7.5]",
        ]
    );

    let log = std::fs::read_to_string(dir.path().join("miniAOD_output.log")).unwrap();
    assert_eq!(log.lines().count(), 1 + 2 * 6);
    assert!(!log.contains("2403"));
}

#[test]
fn chained_inputs_and_extra_column() {
    let dir = tempfile::tempdir().unwrap();
    write_events(&dir.path().join("a.jsonl"), &[event(2403, 1.)]);
    write_events(&dir.path().join("b.jsonl"), &[event(9, 2.25)]);

    let out = run(
        dir.path(),
        &[
            "--inputPath",
            "a.jsonl",
            "-i",
            "b.jsonl",
            "--no-stop",
            "--no-log",
            "--subjet-collection",
            SOFT_DROP_SUBJETS,
        ],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let rows: Vec<_> = stdout.lines().skip(1).collect();
    assert_eq!(
        rows,
        [
            "     1          1      2403     50.000      1.000 [1.0]          2",
            "     1          1         9     50.000      1.000 [2.25]          2",
        ]
    );
    assert!(!dir.path().join("miniAOD_output.log").exists());
}

#[test]
fn empty_input_prints_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_events(&dir.path().join("empty.jsonl"), &[]);

    let out = run(dir.path(), &["-i", "empty.jsonl", "--log-file", "run.log"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), format!("{HEADER}\n"));
    let log = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn root_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["-i", "miniaod.root", "--no-log"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unable to open input miniaod.root"), "{stderr}");
    assert!(out.stdout.is_empty());
}

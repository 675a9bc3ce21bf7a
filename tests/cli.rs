use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("ddsref");
    cmd.env_remove("HOME");
    cmd
}

#[test]
fn lookup_ignores_hex_case() {
    cmd()
        .args(["lookup", "{77d2c902-7779-11d8-9070-00065b840d9c}"])
        .assert()
        .success()
        .stdout(contains("{77D2C902-7779-11D8-9070-00065B840D9C}\tIID\tIDdsPolyline"));
}

#[test]
fn lookup_without_braces() {
    cmd()
        .args(["lookup", "C795D2FE-7776-11D8-9070-00065B840D9C"])
        .assert()
        .success()
        .stdout(contains("MSDDS Diagram Control 80"));
}

#[test]
fn lookup_unknown_guid_exits_1() {
    cmd()
        .args(["lookup", "{00000000-0000-0000-0000-000000000000}"])
        .assert()
        .code(1)
        .stderr(contains("not found"));
}

#[test]
fn lookup_malformed_guid_exits_2() {
    cmd()
        .args(["lookup", "{77d2c902-7779}"])
        .assert()
        .code(2)
        .stderr(contains("malformed GUID"));
}

#[test]
fn find_polyline() {
    cmd()
        .args(["find", "Polyline"])
        .assert()
        .success()
        .stdout(contains("IDdsPolyline"))
        .stdout(contains("MSDDS Polyline Control 80"));
}

#[test]
fn validate_diagram_progid() {
    cmd()
        .args(["validate", "MSDDS.Diagram.080"])
        .assert()
        .success()
        .stdout(contains("resolved\t{C795D2FE-7776-11D8-9070-00065B840D9C}"));
}

#[test]
fn validate_unknown_progid_exits_1() {
    cmd()
        .args(["validate", "MSDDS.NoSuchThing"])
        .assert()
        .code(1)
        .stdout(contains("unresolved"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cmd().arg("install").assert().code(2);
}

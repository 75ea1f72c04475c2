use assert_cmd::Command;

/// Helper to get a Command for the pwgate binary.
#[allow(deprecated)]
fn pwgate_cmd() -> Command {
    Command::cargo_bin("pwgate").unwrap()
}

#[test]
fn help_works() {
    pwgate_cmd().arg("--help").assert().success();
}

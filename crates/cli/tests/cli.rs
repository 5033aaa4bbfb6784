use assert_cmd::Command;

#[test]
fn help_lists_console_commands() {
    let output = Command::cargo_bin("bookshelf")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for command in ["list", "show", "create", "edit", "delete", "open"] {
        assert!(stdout.contains(command), "missing '{}' in help", command);
    }
}

#[test]
fn unknown_path_fails_before_any_request() {
    let output = Command::cargo_bin("bookshelf")
        .unwrap()
        .args(["--api-url", "http://127.0.0.1:9", "open", "/nowhere"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no route matches '/nowhere'"));
}

#[test]
fn unreachable_server_exits_with_failure() {
    let output = Command::cargo_bin("bookshelf")
        .unwrap()
        .args(["--api-url", "http://127.0.0.1:9", "list"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("== Books =="));
}

#[test]
fn ids_with_path_syntax_are_rejected() {
    for id in ["x?y", "x#y", "a/b"] {
        let output = Command::cargo_bin("bookshelf")
            .unwrap()
            .args(["--api-url", "http://127.0.0.1:9", "delete", id])
            .output()
            .unwrap();

        assert!(!output.status.success(), "'{}' was accepted", id);
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("book id must not"), "stderr: {}", stderr);
    }
}

//! Integration tests for the install pipeline public API.

use helm3_step::config::{parse_install_action, InstallStep, RepositoryEntry};
use helm3_step::helm::{install_args, repo_add_args, repository_invocations};
use helm3_step::install::Installer;
use helm3_step::outputs::FileOutputSink;
use helm3_step::testing::{MemoryOutputSink, MemorySecretStore, RecordingRunner};
use helm3_step::InstallError;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn install(
    payload: &str,
    runner: &mut RecordingRunner,
    store: &MemorySecretStore,
    sink: &mut MemoryOutputSink,
) -> Result<(), InstallError> {
    Installer::new(runner, store, sink).install(payload.as_bytes())
}

#[test]
fn reference_step_renders_exactly() {
    let step = parse_install_action(
        br#"
install:
  - helm3:
      name: myrel
      chart: stable/nginx
      version: 1.2.3
      wait: true
      set: {b: "2", a: "1"}
"#,
    )
    .unwrap();

    assert_eq!(
        install_args(&step).join(" "),
        "install myrel stable/nginx --version 1.2.3 --wait --set a=1 --set b=2"
    );
}

#[test]
fn logically_equal_set_maps_render_identically() {
    let mut first = HashMap::new();
    let mut second = HashMap::new();
    for i in 0..32 {
        first.insert(format!("key{:02}", i), i.to_string());
    }
    for i in (0..32).rev() {
        second.insert(format!("key{:02}", i), i.to_string());
    }

    let base = InstallStep {
        name: "r".into(),
        chart: "c".into(),
        ..Default::default()
    };
    let a = install_args(&InstallStep {
        set: first,
        ..base.clone()
    });
    let b = install_args(&InstallStep {
        set: second,
        ..base
    });

    assert_eq!(a, b);
    let keys: Vec<_> = a
        .iter()
        .filter_map(|t| t.split_once('=').map(|(k, _)| k.to_string()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn zero_or_many_steps_never_spawn() {
    for payload in [
        "install: []\n",
        "install:\n  - helm3: {name: a, chart: b}\n  - helm3: {name: c, chart: d}\n",
    ] {
        let mut runner = RecordingRunner::new();
        let store = MemorySecretStore::new();
        let mut sink = MemoryOutputSink::new();

        let err = install(payload, &mut runner, &store, &mut sink).unwrap_err();

        assert!(matches!(err, InstallError::Configuration { .. }));
        assert!(runner.invocations().is_empty());
    }
}

#[test]
fn empty_repository_name_never_spawns() {
    let mut runner = RecordingRunner::new();
    let store = MemorySecretStore::new();
    let mut sink = MemoryOutputSink::new();

    let err = install(
        "install:\n  - helm3:\n      name: a\n      chart: b\n      repos:\n        '': {url: 'https://x'}\n",
        &mut runner,
        &store,
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, InstallError::EmptyRepositoryName { .. }));
    assert!(runner.invocations().is_empty());
}

#[test]
fn lone_certfile_emits_no_tls_flags() {
    let entry = RepositoryEntry {
        url: "https://x".into(),
        certfile: Some("cert.pem".into()),
        ..Default::default()
    };
    let args = repo_add_args("stable", &entry).unwrap();
    assert_eq!(args, vec!["repo", "add", "stable", "https://x"]);
}

#[test]
fn failed_install_never_reaches_the_sink() {
    let mut runner = RecordingRunner::new().fail_on("install", 2);
    let store = MemorySecretStore::new().with_secret(None, "mysql", "password", b"pw");
    let mut sink = MemoryOutputSink::new();

    let err = install(
        "install:\n  - helm3:\n      name: a\n      chart: b\n      outputs:\n        - {name: pw, secret: mysql, key: password}\n",
        &mut runner,
        &store,
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, InstallError::ExecutionFailed { .. }));
    assert_eq!(sink.calls(), 0);
    assert_eq!(store.lookups(), 0);
}

#[test]
fn outputs_are_fail_fast() {
    let mut runner = RecordingRunner::new();
    let store = MemorySecretStore::new().with_secret(None, "mysql", "user", b"wp");
    let mut sink = MemoryOutputSink::new();

    let err = install(
        r#"
install:
  - helm3:
      name: a
      chart: b
      outputs:
        - {name: user, secret: mysql, key: user}
        - {name: root, secret: missing, key: root}
        - {name: other, secret: mysql, key: user}
"#,
        &mut runner,
        &store,
        &mut sink,
    )
    .unwrap_err();

    match err {
        InstallError::OutputResolutionFailed { output, .. } => assert_eq!(output, "root"),
        other => panic!("expected OutputResolutionFailed, got {:?}", other),
    }
    assert_eq!(sink.written(), &[("user".to_string(), b"wp".to_vec())]);
    assert_eq!(store.lookups(), 2);
}

#[test]
fn outputs_land_in_files() {
    let temp = TempDir::new().unwrap();
    let mut runner = RecordingRunner::new();
    let store = MemorySecretStore::new().with_secret(Some("db"), "mysql", "root", b"r00t");
    let mut sink = FileOutputSink::new(temp.path());

    Installer::new(&mut runner, &store, &mut sink)
        .install(
            b"install:\n  - helm3:\n      namespace: db\n      name: a\n      chart: b\n      outputs:\n        - {name: root, secret: mysql, key: root}\n",
        )
        .unwrap();

    assert_eq!(fs::read(temp.path().join("root")).unwrap(), b"r00t");
}

#[test]
fn repositories_are_registered_sorted_before_install() {
    let step = parse_install_action(
        br#"
install:
  - helm3:
      name: a
      chart: c/b
      repos:
        c: {url: "https://c"}
        a: {url: "https://a"}
        b: {url: "https://b"}
"#,
    )
    .unwrap();

    let names: Vec<_> = repository_invocations("helm3", &step)
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let mut runner = RecordingRunner::new();
    let store = MemorySecretStore::new();
    let mut sink = MemoryOutputSink::new();
    Installer::new(&mut runner, &store, &mut sink)
        .install_step(&step)
        .unwrap();

    let commands = runner.commands();
    assert_eq!(commands.len(), 4);
    assert!(commands[3].starts_with("install a c/b"));
}

#[test]
fn unquoted_versions_and_values_render_as_written() {
    let step = parse_install_action(
        br#"
install:
  - helm3:
      name: r
      chart: c
      version: 1.10
      set: {image.tag: 1.20, big: 1e3, hex: 0x10, flag: True}
"#,
    )
    .unwrap();

    assert_eq!(
        install_args(&step).join(" "),
        "install r c --version 1.10 --set big=1e3 --set flag=True --set hex=0x10 --set image.tag=1.20"
    );
}

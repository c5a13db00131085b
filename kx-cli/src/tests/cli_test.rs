use super::*;

#[rstest]
fn test_parse_run() {
    let root = KxCommandRoot::try_parse_from([
        "kx",
        "--kubeconfig",
        "/tmp/kubeconfig",
        "run",
        "debug",
        "-i",
        TEST_IMAGE,
        "-n",
        TEST_NAMESPACE,
        "--secret",
        "API_TOKEN=creds:token",
        "--rm",
        "--command",
        "--",
        "sh",
        "-c",
        "ls -l",
    ])
    .unwrap();

    assert_eq!(root.kubeconfig.as_deref(), Some("/tmp/kubeconfig"));
    let KxSubcommand::Run(args) = root.subcommand else {
        panic!("expected run subcommand");
    };
    assert!(args.rm);
    assert_eq!(args.secrets.len(), 1);
    assert_eq!(args.trailing, vec!["sh", "-c", "ls -l"]);

    let config = args.run_config().unwrap();
    assert_eq!(config.name, "debug");
    assert_eq!(config.namespace, TEST_NAMESPACE);
    assert_eq!(config.secrets[0].secret_name, "creds");
}

#[rstest]
fn test_parse_run_bad_secret() {
    assert_err!(KxCommandRoot::try_parse_from(["kx", "run", "debug", "--secret", "API_TOKEN"]));
}

#[rstest]
fn test_parse_attach() {
    let root =
        KxCommandRoot::try_parse_from(["kx", "a", TEST_POD_NAME, "-c", TEST_SIDECAR_CONTAINER_NAME, "-t"]).unwrap();
    let KxSubcommand::Attach(args) = root.subcommand else {
        panic!("expected attach subcommand");
    };
    assert_eq!(args.namespace, DEFAULT_NAMESPACE);

    let opts = args.attach_options();
    assert_eq!(opts.container.as_deref(), Some(TEST_SIDECAR_CONTAINER_NAME));
    assert!(opts.tty);
    assert!(opts.stdin);
}

use super::*;

#[rstest]
fn test_stream_options_all() {
    let opts = AttachOptions::default();
    let streams = stream_options(&opts, "in", "out", "err");
    assert_eq!(streams.stdin, Some("in"));
    assert_eq!(streams.stdout, Some("out"));
    assert_eq!(streams.stderr, Some("err"));
}

#[rstest]
#[case::no_stdin(false, true, true)]
#[case::no_stdout(true, false, true)]
#[case::no_stderr(true, true, false)]
#[case::none(false, false, false)]
fn test_stream_options_filtered(#[case] stdin: bool, #[case] stdout: bool, #[case] stderr: bool) {
    let opts = AttachOptions { stdin, stdout, stderr, ..Default::default() };
    let streams = stream_options(&opts, 1, 2, 3);
    assert_eq!(streams.stdin.is_some(), stdin);
    assert_eq!(streams.stdout.is_some(), stdout);
    assert_eq!(streams.stderr.is_some(), stderr);
}

#[rstest]
fn test_attach_params() {
    let params = attach_params(&AttachOptions::default(), TEST_SIDECAR_CONTAINER_NAME);
    assert_eq!(params.container.as_deref(), Some(TEST_SIDECAR_CONTAINER_NAME));
    assert!(params.stdin);
    assert!(params.stdout);
    assert!(params.stderr);
    assert!(!params.tty);
}

#[rstest]
fn test_attach_params_tty_drops_stderr() {
    let opts = AttachOptions { tty: true, ..Default::default() };
    let params = attach_params(&opts, TEST_POD_NAME);
    assert!(params.tty);
    assert!(params.stdout);
    assert!(!params.stderr);
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_attach_unknown_container(#[with("Running")] test_pod: corev1::Pod) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.build();

    let opts = AttachOptions { container: Some("nope".into()), ..Default::default() };
    let streams = stream_options(&opts, tokio::io::empty(), tokio::io::sink(), tokio::io::sink());
    let err = attach(client, &test_pod, &opts, streams).await.unwrap_err();

    assert_eq!(err.to_string(), format!("error attaching to {TEST_NAMESPACE}/{TEST_POD_NAME}"));
    assert_contains!(format!("{err:#}"), "container not found (nope)");
}

#[rstest]
#[case::no_status(None)]
#[case::success(Some(metav1::Status { status: Some("Success".into()), ..Default::default() }))]
fn test_check_attach_status_ok(#[case] status: Option<metav1::Status>) {
    assert_ok!(check_attach_status(status));
}

#[rstest]
fn test_check_attach_status_failure() {
    let status = metav1::Status {
        status: Some("Failure".into()),
        message: Some("container the-pod is not running".into()),
        reason: Some("BadRequest".into()),
        ..Default::default()
    };
    let err = check_attach_status(Some(status)).unwrap_err();
    assert_eq!(err.to_string(), "attach failed: container the-pod is not running");
}

#[rstest]
fn test_check_attach_status_failure_reason_only() {
    let status = metav1::Status {
        status: Some("Failure".into()),
        reason: Some("NonZeroExitCode".into()),
        ..Default::default()
    };
    assert_contains!(check_attach_status(Some(status)).unwrap_err().to_string(), "NonZeroExitCode");
}

use httpmock::Method::*;

use super::*;

#[fixture]
fn run_config() -> RunConfig {
    RunConfig {
        namespace: TEST_NAMESPACE.into(),
        name: TEST_POD_NAME.into(),
        image: TEST_IMAGE.into(),
        secrets: vec![
            "API_TOKEN=creds:token".parse().unwrap(),
            "DB_PASSWORD=db-creds:password".parse().unwrap(),
        ],
        ..Default::default()
    }
}

#[rstest]
fn test_build_pod(run_config: RunConfig) {
    let command = vec!["/bin/sh".to_string()];
    let args = vec!["-c".to_string(), "cat".to_string()];
    let pod = build_pod(&run_config, &command, &args);

    assert_eq!(pod.namespaced_name(), format!("{TEST_NAMESPACE}/{TEST_POD_NAME}"));
    let labels = pod.labels();
    assert_eq!(labels[APP_KUBERNETES_IO_NAME_KEY], TEST_POD_NAME);
    assert_eq!(labels[APP_KUBERNETES_IO_MANAGED_BY_KEY], KX_MANAGER_NAME);

    let spec = pod.spec.unwrap();
    assert_eq!(spec.restart_policy.as_deref(), Some(RESTART_POLICY_ON_FAILURE));
    assert_is_empty!(spec.volumes.unwrap());
    assert_is_empty!(spec.image_pull_secrets.unwrap());
    assert_eq!(spec.containers.len(), 1);

    let container = &spec.containers[0];
    assert_eq!(container.name, TEST_POD_NAME);
    assert_eq!(container.image.as_deref(), Some(TEST_IMAGE));
    assert_eq!(container.command, Some(command));
    assert_eq!(container.args, Some(args));
    assert_eq!(container.stdin, Some(true));
    assert_eq!(container.tty, Some(false));
    assert_eq!(container.image_pull_policy.as_deref(), Some(IMAGE_PULL_POLICY_ALWAYS));
    assert_eq!(container.security_context.as_ref().unwrap().privileged, Some(false));
    assert_is_empty!(container.volume_mounts.as_ref().unwrap());

    let env = container.env.as_ref().unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env[0].name, "API_TOKEN");
    assert_none!(env[0].value);
    let secret_ref = env[0].value_from.as_ref().unwrap().secret_key_ref.as_ref().unwrap();
    assert_eq!(secret_ref.name, "creds");
    assert_eq!(secret_ref.key, "token");
    assert_eq!(env[1].name, "DB_PASSWORD");
}

#[rstest]
fn test_build_pod_no_command(run_config: RunConfig) {
    let pod = build_pod(&run_config, &[], &[]);
    let container = &pod.spec.unwrap().containers[0];
    assert_none!(container.command);
    assert_none!(container.args);
}

#[rstest]
fn test_build_pod_tty(mut run_config: RunConfig) {
    run_config.tty = true;
    let pod = build_pod(&run_config, &[], &[]);
    assert_eq!(pod.spec.unwrap().containers[0].tty, Some(true));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_create_pod(run_config: RunConfig) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let created = build_pod(&run_config, &[], &[]);
    fake_apiserver.handle_create_pod(TEST_NAMESPACE, created).build();

    let pod = create_pod(client, &run_config, &[], &[]).await.unwrap();
    fake_apiserver.assert();
    assert_eq!(pod.name_any(), TEST_POD_NAME);
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_get_pod(#[with("Running")] test_pod: corev1::Pod) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_get_pod(test_pod.clone()).build();

    let pod = get_pod(client, TEST_NAMESPACE, TEST_POD_NAME).await.unwrap();
    fake_apiserver.assert();
    assert_eq!(pod, test_pod);
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_get_pod_not_found() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_not_found(pod_path(TEST_NAMESPACE, TEST_POD_NAME)).build();

    let err = get_pod(client, TEST_NAMESPACE, TEST_POD_NAME).await.unwrap_err();
    fake_apiserver.assert();
    assert_contains!(err.to_string(), &format!("{TEST_NAMESPACE}/{TEST_POD_NAME}"));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_delete_pod(test_pod: corev1::Pod) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_delete_pod(test_pod).build();

    delete_pod(client, TEST_NAMESPACE, TEST_POD_NAME).await.unwrap();
    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_delete_pod_already_gone() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle(|when, then| {
            when.method(DELETE).path(pod_path(TEST_NAMESPACE, TEST_POD_NAME));
            then.status(404).json_body(status_not_found());
        })
        .build();

    assert_ok!(delete_pod(client, TEST_NAMESPACE, TEST_POD_NAME).await);
    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_delete_pod_server_error() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle(|when, then| {
            when.method(DELETE).path(pod_path(TEST_NAMESPACE, TEST_POD_NAME));
            then.status(403).json_body(status_forbidden());
        })
        .build();

    assert_err!(delete_pod(client, TEST_NAMESPACE, TEST_POD_NAME).await);
    fake_apiserver.assert();
}

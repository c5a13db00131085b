use std::collections::BTreeMap;

use kube::api::{
    DeleteParams,
    PostParams,
};
use tracing::*;

use super::*;
use crate::errors::*;
use crate::prelude::*;

fn build_secret_env(secrets: &[SecretEnvVar]) -> Vec<corev1::EnvVar> {
    secrets
        .iter()
        .map(|s| corev1::EnvVar {
            name: s.env_var_name.clone(),
            value_from: Some(corev1::EnvVarSource {
                secret_key_ref: Some(corev1::SecretKeySelector {
                    name: s.secret_name.clone(),
                    key: s.secret_key.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

// Empty lists are left unset so the container's default entrypoint/cmd are used
fn non_empty(items: &[String]) -> Option<Vec<String>> {
    (!items.is_empty()).then(|| items.to_vec())
}

pub fn build_pod(cfg: &RunConfig, command: &[String], args: &[String]) -> corev1::Pod {
    let labels = BTreeMap::from([
        (APP_KUBERNETES_IO_NAME_KEY.to_string(), cfg.name.clone()),
        (APP_KUBERNETES_IO_MANAGED_BY_KEY.to_string(), KX_MANAGER_NAME.to_string()),
    ]);

    corev1::Pod {
        metadata: metav1::ObjectMeta {
            name: Some(cfg.name.clone()),
            namespace: Some(cfg.namespace.clone()),
            labels: Some(labels),
            ..Default::default()
        },
        spec: Some(corev1::PodSpec {
            containers: vec![corev1::Container {
                name: cfg.name.clone(),
                image: Some(cfg.image.clone()),
                command: non_empty(command),
                args: non_empty(args),
                stdin: Some(true),
                tty: Some(cfg.tty),
                security_context: Some(corev1::SecurityContext {
                    privileged: Some(false),
                    ..Default::default()
                }),
                image_pull_policy: Some(IMAGE_PULL_POLICY_ALWAYS.into()),
                env: Some(build_secret_env(&cfg.secrets)),
                volume_mounts: Some(vec![]),
                ..Default::default()
            }],
            restart_policy: Some(RESTART_POLICY_ON_FAILURE.into()),
            volumes: Some(vec![]),
            image_pull_secrets: Some(vec![]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub async fn create_pod(
    client: kube::Client,
    cfg: &RunConfig,
    command: &[String],
    args: &[String],
) -> anyhow::Result<corev1::Pod> {
    let pod_api = kube::Api::<corev1::Pod>::namespaced(client, &cfg.namespace);
    let pod = build_pod(cfg, command, args);

    info!("creating pod {}/{} with image {}", cfg.namespace, cfg.name, cfg.image);
    Ok(pod_api.create(&PostParams::default(), &pod).await?)
}

pub async fn get_pod(client: kube::Client, namespace: &str, name: &str) -> anyhow::Result<corev1::Pod> {
    let pod_api = kube::Api::<corev1::Pod>::namespaced(client, namespace);
    match pod_api.get_opt(name).await? {
        Some(pod) => Ok(pod),
        None => Err(KubernetesError::pod_not_found(&format!("{namespace}/{name}"))),
    }
}

// A pod that's already gone counts as deleted
pub async fn delete_pod(client: kube::Client, namespace: &str, name: &str) -> EmptyResult {
    let pod_api = kube::Api::<corev1::Pod>::namespaced(client, namespace);

    info!("deleting pod {namespace}/{name}");
    match pod_api.delete(name, &DeleteParams::default()).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(ae)) if ae.code == HTTP_NOT_FOUND => {
            debug!("pod {namespace}/{name} already gone, nothing to delete");
            Ok(())
        },
        Err(err) => Err(err.into()),
    }
}

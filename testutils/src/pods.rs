use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::fixture;
use serde_json::json;

use crate::constants::*;

fn container(name: &str) -> corev1::Container {
    corev1::Container {
        name: name.into(),
        image: Some(TEST_IMAGE.into()),
        ..Default::default()
    }
}

#[fixture]
pub fn test_pod(#[default("Pending")] phase: &str) -> corev1::Pod {
    corev1::Pod {
        metadata: metav1::ObjectMeta {
            namespace: Some(TEST_NAMESPACE.into()),
            name: Some(TEST_POD_NAME.into()),
            ..Default::default()
        },
        spec: Some(corev1::PodSpec {
            containers: vec![container(TEST_POD_NAME), container(TEST_SIDECAR_CONTAINER_NAME)],
            init_containers: Some(vec![container(TEST_INIT_CONTAINER_NAME)]),
            ..Default::default()
        }),
        status: Some(corev1::PodStatus { phase: Some(phase.into()), ..Default::default() }),
    }
}

pub fn pod_list(pods: &[corev1::Pod]) -> serde_json::Value {
    json!({
        "kind": "PodList",
        "apiVersion": "v1",
        "metadata": {"resourceVersion": "1"},
        "items": pods,
    })
}

pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_POD_NAME: &str = "the-pod";
pub const TEST_IMAGE: &str = "docker.io/library/busybox:1.36";
pub const TEST_INIT_CONTAINER_NAME: &str = "the-init-container";
pub const TEST_SIDECAR_CONTAINER_NAME: &str = "the-sidecar";

// Well-known labels
pub const APP_KUBERNETES_IO_NAME_KEY: &str = "app.kubernetes.io/name";
pub const APP_KUBERNETES_IO_MANAGED_BY_KEY: &str = "app.kubernetes.io/managed-by";
pub const KX_MANAGER_NAME: &str = "kx";

// Pod phases
pub const POD_PHASE_PENDING: &str = "Pending";
pub const POD_PHASE_RUNNING: &str = "Running";
pub const POD_PHASE_SUCCEEDED: &str = "Succeeded";
pub const POD_PHASE_FAILED: &str = "Failed";

// Pod spec values
pub const IMAGE_PULL_POLICY_ALWAYS: &str = "Always";
pub const RESTART_POLICY_ON_FAILURE: &str = "OnFailure";

// Defaults
pub const DEFAULT_NAMESPACE: &str = "default";

// HTTP status codes
pub const HTTP_NOT_FOUND: u16 = 404;

use anyhow::Context;
use kube::config::{
    KubeConfigOptions,
    Kubeconfig,
};
use tracing::*;

// Build a kube client from the given kubeconfig file, or infer the config from the environment
// (KUBECONFIG, ~/.kube/config, then in-cluster) if no file is given.
pub async fn build_client(kubeconfig: Option<&str>) -> anyhow::Result<kube::Client> {
    let config = match kubeconfig {
        Some(path) => {
            debug!("loading kubeconfig from {path}");
            load_config(path)
                .await
                .with_context(|| format!("could not get kubernetes config from kubeconfig '{path}'"))?
        },
        None => kube::Config::infer()
            .await
            .context("could not get kubernetes config from environment")?,
    };

    kube::Client::try_from(config).context("could not get kubernetes client")
}

async fn load_config(path: &str) -> anyhow::Result<kube::Config> {
    let kubeconfig = Kubeconfig::read_from(path)?;
    Ok(kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?)
}

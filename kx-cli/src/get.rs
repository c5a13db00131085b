use kx_core::k8s::get_pod;
use kx_core::prelude::*;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "name of the pod")]
    pub name: String,

    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    let pod = get_pod(client, &args.namespace, &args.name).await?;
    println!("{}: {}", pod.namespaced_name(), pod.phase().unwrap_or("Unknown"));
    Ok(())
}

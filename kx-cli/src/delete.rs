use kx_core::k8s::delete_pod;
use kx_core::prelude::*;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "name of the pod to delete")]
    pub name: String,

    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    println!("deleting pod {}/{}...", args.namespace, args.name);
    delete_pod(client, &args.namespace, &args.name).await
}

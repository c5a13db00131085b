#![cfg_attr(coverage, feature(coverage_attribute))]
mod attach;
mod delete;
mod get;
mod run;

use clap::{
    Parser,
    Subcommand,
    crate_version,
};
use kx_core::k8s::build_client;
use kx_core::logging;
use kx_core::prelude::*;

#[derive(Debug, Parser)]
#[command(
    about = "command-line app for launching and attaching to throwaway pods",
    version,
    propagate_version = true
)]
struct KxCommandRoot {
    #[command(subcommand)]
    subcommand: KxSubcommand,

    #[arg(short, long, default_value = "warn")]
    verbosity: String,

    #[arg(long, global = true, long_help = "path to the kubeconfig file to use (defaults to the standard lookup)")]
    kubeconfig: Option<String>,
}

#[derive(Debug, Subcommand)]
enum KxSubcommand {
    #[command(about = "attach to a running pod", visible_alias = "a")]
    Attach(attach::Args),

    #[command(
        about = "delete a pod",
        visible_aliases = &["d", "del", "rm"],
    )]
    Delete(delete::Args),

    #[command(about = "print the phase of a pod")]
    Get(get::Args),

    #[command(about = "launch a pod, wait for it to run, and attach to it", visible_alias = "r")]
    Run(run::Args),

    #[command(about = "kx version")]
    Version,
}

#[tokio::main]
async fn main() -> EmptyResult {
    let args = KxCommandRoot::parse();
    logging::setup_for_cli(&args.verbosity);

    match &args.subcommand {
        KxSubcommand::Attach(sub_args) => {
            let client = build_client(args.kubeconfig.as_deref()).await?;
            attach::cmd(sub_args, client).await
        },
        KxSubcommand::Delete(sub_args) => {
            let client = build_client(args.kubeconfig.as_deref()).await?;
            delete::cmd(sub_args, client).await
        },
        KxSubcommand::Get(sub_args) => {
            let client = build_client(args.kubeconfig.as_deref()).await?;
            get::cmd(sub_args, client).await
        },
        KxSubcommand::Run(sub_args) => {
            // The run config file can name its own kubeconfig, but the flag wins
            let config = sub_args.run_config()?;
            let kubeconfig = args.kubeconfig.as_deref().or(config.kubeconfig.as_deref());
            let client = build_client(kubeconfig).await?;
            run::cmd(sub_args, &config, client).await
        },
        KxSubcommand::Version => {
            println!("kx {}", crate_version!());
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests;

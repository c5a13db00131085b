use std::time::Duration;

use kx_core::k8s::{
    AttachOptions,
    create_pod,
    delete_pod,
};
use kx_core::prelude::*;
use tracing::*;

use crate::attach::wait_and_attach;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "name of the pod (and its container) to launch")]
    pub name: Option<String>,

    #[arg(short, long, long_help = "container image to run")]
    pub image: Option<String>,

    #[arg(short, long, long_help = "namespace to launch the pod in [default: default]")]
    pub namespace: Option<String>,

    #[arg(
        short = 'f',
        long,
        long_help = "YAML file with run configuration; command-line flags override its values"
    )]
    pub config: Option<String>,

    #[arg(
        long = "secret",
        long_help = "expose a secret key as an environment variable, as ENV_VAR=secret-name:key (repeatable)"
    )]
    pub secrets: Vec<SecretEnvVar>,

    #[arg(short, long, long_help = "allocate a TTY for the container and the attached session")]
    pub tty: bool,

    #[arg(long, long_help = "delete the pod once the session ends")]
    pub rm: bool,

    #[arg(long, long_help = "seconds to wait for the pod to be running before giving up")]
    pub timeout: Option<u64>,

    #[arg(
        long,
        long_help = "treat the trailing arguments as the container command instead of arguments to its entrypoint"
    )]
    pub command: bool,

    #[arg(last = true)]
    pub trailing: Vec<String>,
}

impl Args {
    pub fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(image) = &self.image {
            config.image = image.clone();
        }
        if let Some(ns) = &self.namespace {
            config.namespace = ns.clone();
        }
        config.tty |= self.tty;
        config.secrets.extend(self.secrets.iter().cloned());

        config.validate()?;
        Ok(config)
    }

    // Returns the (command, args) pair for the container
    pub fn command_and_args(&self) -> (Vec<String>, Vec<String>) {
        if self.command {
            match self.trailing.split_first() {
                Some((cmd, rest)) => (vec![cmd.clone()], rest.to_vec()),
                None => (vec![], vec![]),
            }
        } else {
            (vec![], self.trailing.clone())
        }
    }
}

pub async fn cmd(args: &Args, config: &RunConfig, client: kube::Client) -> EmptyResult {
    let (command, container_args) = args.command_and_args();
    let pod = create_pod(client.clone(), config, &command, &container_args).await?;
    println!("created pod {}", pod.namespaced_name());

    let opts = AttachOptions { tty: config.tty, ..Default::default() };
    let res = wait_and_attach(client.clone(), &pod, &opts, args.timeout.map(Duration::from_secs)).await;

    if args.rm {
        println!("deleting pod {}...", pod.namespaced_name());
        if let Err(err) = delete_pod(client, &config.namespace, &config.name).await {
            warn!("could not clean up pod {}: {err}", pod.namespaced_name());
        }
    }

    res
}

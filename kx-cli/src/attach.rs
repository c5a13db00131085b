use std::io::{
    ErrorKind,
    Read,
};
use std::time::Duration;

use kx_core::k8s::{
    AttachOptions,
    attach,
    get_pod,
    stream_options,
    wait_for_running,
};
use kx_core::prelude::*;
use tokio::io::{
    AsyncWriteExt,
    DuplexStream,
};
use tokio::sync::mpsc;
use tracing::*;

const STDIN_BUF_SIZE: usize = 8192;
const STDIN_CHANNEL_DEPTH: usize = 16;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "name of the pod to attach to")]
    pub name: String,

    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    #[arg(short, long, long_help = "container to attach to (defaults to the first container)")]
    pub container: Option<String>,

    #[arg(short, long, long_help = "allocate a TTY for the attached session")]
    pub tty: bool,

    #[arg(long, long_help = "seconds to wait for the pod to be running before giving up")]
    pub timeout: Option<u64>,
}

impl Args {
    pub fn attach_options(&self) -> AttachOptions {
        AttachOptions {
            container: self.container.clone(),
            tty: self.tty,
            ..Default::default()
        }
    }
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    let pod = get_pod(client.clone(), &args.namespace, &args.name).await?;
    wait_and_attach(client, &pod, &args.attach_options(), args.timeout.map(Duration::from_secs)).await
}

// Shared by `run` and `attach`: block until the pod is running, then hook it up to our terminal
pub(crate) async fn wait_and_attach(
    client: kube::Client,
    pod: &corev1::Pod,
    opts: &AttachOptions,
    timeout: Option<Duration>,
) -> EmptyResult {
    let pod = wait_for_running(client.clone(), pod, timeout).await?;
    let streams = stream_options(opts, spawn_reader(std::io::stdin()), tokio::io::stdout(), tokio::io::stderr());
    attach(client, &pod, opts, streams).await
}

// tokio::io::stdin reads on the blocking pool, and a read still parked there when the session ends
// holds up runtime shutdown until the user hits enter.  Reading on a detached thread instead lets
// the process exit as soon as main returns.
pub(crate) fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> DuplexStream {
    let (mut writer, stream) = tokio::io::duplex(STDIN_BUF_SIZE);
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(STDIN_CHANNEL_DEPTH);

    std::thread::spawn(move || {
        let mut buf = vec![0u8; STDIN_BUF_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.blocking_send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                },
                Err(err) if err.kind() == ErrorKind::Interrupted => (),
                Err(err) => {
                    debug!("error reading stdin: {err}");
                    break;
                },
            }
        }
    });

    // Dropping the writer once the channel closes gives the attach session its EOF
    tokio::spawn(async move {
        while let Some(chunk) = rx.recv().await {
            if let Err(err) = writer.write_all(&chunk).await {
                debug!("could not forward stdin: {err}");
                break;
            }
        }
    });

    stream
}

use anyhow::Context;
use futures::future::try_join;
use kube::api::AttachParams;
use tokio::io::{
    AsyncRead,
    AsyncWrite,
    AsyncWriteExt,
};
use tracing::*;

use super::*;
use crate::errors::*;
use crate::prelude::*;

const ATTACH_STATUS_FAILURE: &str = "Failure";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachOptions {
    pub container: Option<String>,
    pub stdin: bool,
    pub stdout: bool,
    pub stderr: bool,
    pub tty: bool,
}

impl Default for AttachOptions {
    fn default() -> Self {
        AttachOptions {
            container: None,
            stdin: true,
            stdout: true,
            stderr: true,
            tty: false,
        }
    }
}

// The local ends of the attached streams; a stream that is None is not connected
pub struct StreamOptions<I, O, E> {
    pub stdin: Option<I>,
    pub stdout: Option<O>,
    pub stderr: Option<E>,
}

pub fn stream_options<I, O, E>(opts: &AttachOptions, stdin: I, stdout: O, stderr: E) -> StreamOptions<I, O, E> {
    StreamOptions {
        stdin: opts.stdin.then_some(stdin),
        stdout: opts.stdout.then_some(stdout),
        stderr: opts.stderr.then_some(stderr),
    }
}

// With a TTY the server merges stderr into stdout and rejects requests that ask for both
pub fn attach_params(opts: &AttachOptions, container_name: &str) -> AttachParams {
    AttachParams::default()
        .container(container_name)
        .stdin(opts.stdin)
        .stdout(opts.stdout)
        .stderr(opts.stderr && !opts.tty)
        .tty(opts.tty)
}

// The server reports how the attached process ended with a Status object; anything but an
// explicit Failure counts as success
pub fn check_attach_status(status: Option<metav1::Status>) -> EmptyResult {
    match status {
        Some(st) if st.status.as_deref() == Some(ATTACH_STATUS_FAILURE) => {
            let msg = st.message.or(st.reason).unwrap_or_default();
            Err(KubernetesError::attach_failed(&msg))
        },
        _ => Ok(()),
    }
}

pub async fn attach<I, O, E>(
    client: kube::Client,
    pod: &corev1::Pod,
    opts: &AttachOptions,
    streams: StreamOptions<I, O, E>,
) -> EmptyResult
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let ns_name = pod.namespaced_name();
    attach_inner(client, pod, opts, streams)
        .await
        .with_context(|| format!("error attaching to {ns_name}"))
}

async fn attach_inner<I, O, E>(
    client: kube::Client,
    pod: &corev1::Pod,
    opts: &AttachOptions,
    streams: StreamOptions<I, O, E>,
) -> EmptyResult
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let container = container_to_attach_to(opts.container.as_deref().unwrap_or_default(), pod)
        .context("cannot get container to attach to")?;
    let ns = pod.namespace().unwrap_or_else(|| DEFAULT_NAMESPACE.into());
    let pod_api = kube::Api::<corev1::Pod>::namespaced(client, &ns);
    let params = attach_params(opts, &container.name);

    info!("attaching to container {} in pod {}", container.name, pod.namespaced_name());
    let mut attached = pod_api.attach(&pod.name_any(), &params).await?;

    let remote_stdin = attached.stdin();
    let remote_stdout = attached.stdout();
    let remote_stderr = attached.stderr();
    let status = attached.take_status();
    let StreamOptions { stdin, stdout, stderr } = streams;

    let stdin_pump = async move {
        if let (Some(mut local), Some(mut remote)) = (stdin, remote_stdin) {
            match tokio::io::copy(&mut local, &mut remote).await {
                Ok(n) => debug!("local stdin closed after {n} bytes"),
                Err(err) => warn!("error forwarding stdin: {err}"),
            }
            if let Err(err) = remote.shutdown().await {
                debug!("could not close remote stdin: {err}");
            }
        }

        // Keep going until the remote side finishes; the container may outlive our stdin
        futures::future::pending::<()>().await
    };

    let stdout_pump = async move {
        if let (Some(mut local), Some(mut remote)) = (stdout, remote_stdout) {
            tokio::io::copy(&mut remote, &mut local).await?;
        }
        Ok::<_, std::io::Error>(())
    };

    let stderr_pump = async move {
        if let (Some(mut local), Some(mut remote)) = (stderr, remote_stderr) {
            tokio::io::copy(&mut remote, &mut local).await?;
        }
        Ok::<_, std::io::Error>(())
    };

    // The status only shows up once the remote process is done, so this also covers the case
    // where no output streams were requested
    let finished = async move {
        try_join(stdout_pump, stderr_pump).await?;
        Ok::<_, anyhow::Error>(match status {
            Some(status_fut) => status_fut.await,
            None => None,
        })
    };

    let final_status = tokio::select! {
        res = finished => res?,
        _ = stdin_pump => None,
    };

    check_attach_status(final_status)?;
    attached.join().await?;
    debug!("attach session for {} finished", pod.namespaced_name());
    Ok(())
}

use std::time::Duration;

use futures::StreamExt;
use kube::runtime::{
    WatchStreamExt,
    watcher,
};
use tracing::*;

use super::*;
use crate::errors::*;
use crate::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WaitState {
    Pending,
    Running,
    Terminated(String),
}

pub fn pod_wait_state(pod: &corev1::Pod) -> WaitState {
    match pod.phase() {
        Some(POD_PHASE_RUNNING) => WaitState::Running,
        Some(phase @ (POD_PHASE_SUCCEEDED | POD_PHASE_FAILED)) => WaitState::Terminated(phase.into()),
        _ => WaitState::Pending,
    }
}

// Waits until the given pod is in the Running phase, and returns the most recent copy of it.
// Pods that finish (or are deleted) before they run are an error, since there'd be nothing to
// attach to.
pub async fn wait_for_running(
    client: kube::Client,
    pod: &corev1::Pod,
    timeout: Option<Duration>,
) -> anyhow::Result<corev1::Pod> {
    let stop = StopSignal::new();
    let timer = timeout.map(|t| {
        let stop = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(t).await;
            stop.stop();
        })
    });

    let res = wait_for_running_until(client, pod, &stop).await;
    if let Some(handle) = timer {
        handle.abort();
    }

    match res? {
        Some(running) => Ok(running),
        None => {
            let t = timeout.unwrap_or_default();
            Err(KubernetesError::wait_timeout(&format!("{} after {t:?}", pod.namespaced_name())))
        },
    }
}

// Like wait_for_running, but gives up (returning None) as soon as the stop signal fires
pub async fn wait_for_running_until(
    client: kube::Client,
    pod: &corev1::Pod,
    stop: &StopSignal,
) -> anyhow::Result<Option<corev1::Pod>> {
    let name = pod.name_any();
    let ns = pod.namespace().unwrap_or_else(|| DEFAULT_NAMESPACE.into());
    let ns_name = pod.namespaced_name();
    let pod_api = kube::Api::<corev1::Pod>::namespaced(client, &ns);

    let config = watcher::Config::default().fields(&format!("metadata.name={name}"));
    let mut pod_stream = watcher(pod_api, config).default_backoff().boxed();

    // Whether the current (re-)list contained our pod; if it didn't, the pod is already gone and
    // we'll never see a delete event for it
    let mut seen_in_list = false;

    info!("waiting for pod {ns_name} to be running");
    loop {
        let event = tokio::select! {
            biased;

            _ = stop.stopped() => {
                info!("stopped waiting for pod {ns_name}");
                return Ok(None);
            },
            maybe_event = pod_stream.next() => match maybe_event {
                Some(Ok(event)) => event,
                Some(Err(err)) => {
                    warn!("error watching pod {ns_name}, retrying: {err}");
                    continue;
                },
                None => bail!("watch stream for pod {ns_name} ended unexpectedly"),
            },
        };

        let p = match event {
            watcher::Event::Init => {
                seen_in_list = false;
                continue;
            },
            watcher::Event::InitDone if !seen_in_list => return Err(KubernetesError::pod_deleted(&ns_name)),
            watcher::Event::Delete(p) if p.name_any() == name => return Err(KubernetesError::pod_deleted(&ns_name)),
            watcher::Event::InitApply(p) if p.name_any() == name => {
                seen_in_list = true;
                p
            },
            // the field selector should take care of other pods, but be careful anyways
            watcher::Event::Apply(p) if p.name_any() == name => p,
            _ => continue,
        };

        match pod_wait_state(&p) {
            WaitState::Running => {
                info!("pod {ns_name} is running");
                return Ok(Some(p));
            },
            WaitState::Terminated(phase) => {
                return Err(KubernetesError::pod_terminated(&format!("{ns_name} ({phase})")));
            },
            WaitState::Pending => debug!("pod {ns_name} not running yet: {:?}", p.phase()),
        }
    }
}

use super::*;
use crate::prelude::*;

// Returns the container to attach to, given by name, or the first container if the name is
// empty.  Regular containers are searched before init containers.
pub fn container_to_attach_to<'a>(name: &str, pod: &'a corev1::Pod) -> anyhow::Result<&'a corev1::Container> {
    let spec = pod.spec()?;
    if name.is_empty() {
        return match spec.containers.first() {
            Some(c) => Ok(c),
            None => Err(KubernetesError::container_not_found("<first>")),
        };
    }

    spec.containers
        .iter()
        .chain(spec.init_containers.iter().flatten())
        .find(|c| c.name == name)
        .ok_or_else(|| KubernetesError::container_not_found(name))
}

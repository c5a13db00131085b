use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};
use k8s_openapi::api::core::v1 as corev1;
use serde_json::json;

use crate::pods::pod_list;

// A fake apiserver backed by httpmock; register handlers, call build(), then point a
// kube::Client at it.
pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Box<dyn Fn(When, Then)>>,
    mock_ids: Vec<usize>,
}

fn print_req(req: &HttpMockRequest) -> bool {
    // Use println instead of info! so that this works outside of the lib crate
    println!("    Received: {} {}", req.method(), req.uri().path());
    true
}

pub fn pods_path(ns: &str) -> String {
    format!("/api/v1/namespaces/{ns}/pods")
}

pub fn pod_path(ns: &str, name: &str) -> String {
    format!("/api/v1/namespaces/{ns}/pods/{name}")
}

fn pod_path_for(pod: &corev1::Pod) -> String {
    let ns = pod.metadata.namespace.as_deref().unwrap_or_default();
    let name = pod.metadata.name.as_deref().unwrap_or_default();
    pod_path(ns, name)
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder {
            server: MockServer::start(),
            handlers: vec![],
            mock_ids: vec![],
        }
    }

    pub fn assert(&self) {
        for id in &self.mock_ids {
            println!("checking assertions for mock {id}");
            Mock::new(*id, &self.server).assert()
        }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handlers.push(Box::new(move |w, t| {
            let w = w.matches(print_req);
            f(w, t);
        }));
        self
    }

    pub fn handle_not_found(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.path(&path);
            then.status(404).json_body(status_not_found());
        })
    }

    pub fn handle_get_pod(&mut self, pod: corev1::Pod) -> &mut Self {
        let path = pod_path_for(&pod);
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body_obj(&pod);
        })
    }

    // Both the initial list and any follow-up watch requests land here, so the watcher sees the
    // same set of pods every time it (re-)lists
    pub fn handle_list_pods(&mut self, ns: &str, pods: Vec<corev1::Pod>) -> &mut Self {
        let path = pods_path(ns);
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body(pod_list(&pods));
        })
    }

    // Serves the initial list only; watch requests are left for handle_watch_pods
    pub fn handle_initial_list_pods(&mut self, ns: &str, pods: Vec<corev1::Pod>) -> &mut Self {
        let path = pods_path(ns);
        self.handle(move |when, then| {
            when.method(GET).path(&path).query_param_missing("watch");
            then.json_body(pod_list(&pods));
        })
    }

    // Each event is a (type, object) pair, e.g. ("DELETED", pod), streamed as newline-delimited JSON
    pub fn handle_watch_pods(&mut self, ns: &str, events: Vec<(&str, corev1::Pod)>) -> &mut Self {
        let path = pods_path(ns);
        let body: String = events
            .iter()
            .map(|(typ, pod)| json!({"type": typ, "object": pod}).to_string() + "\n")
            .collect();
        self.handle(move |when, then| {
            when.method(GET).path(&path).query_param("watch", "true");
            then.body(&body);
        })
    }

    pub fn handle_create_pod(&mut self, ns: &str, created: corev1::Pod) -> &mut Self {
        let path = pods_path(ns);
        self.handle(move |when, then| {
            when.method(POST).path(&path);
            then.status(201).json_body_obj(&created);
        })
    }

    pub fn handle_delete_pod(&mut self, pod: corev1::Pod) -> &mut Self {
        let path = pod_path_for(&pod);
        self.handle(move |when, then| {
            when.method(DELETE).path(&path);
            then.json_body_obj(&pod);
        })
    }

    pub fn build(&mut self) {
        for f in self.handlers.iter() {
            self.mock_ids.push(self.server.mock(f).id);
        }

        // Print all unmatched/unhandled requests for easier debugging;
        // this has to go last so that the other mock rules have a chance
        // to match first
        self.server.mock(|when, _| {
            when.matches(print_req);
        });
    }

    pub fn url(&self) -> http::Uri {
        http::Uri::try_from(self.server.url("/")).unwrap()
    }
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        MockServerBuilder::new()
    }
}

pub fn make_fake_apiserver() -> (MockServerBuilder, kube::Client) {
    let builder = MockServerBuilder::new();
    let config = kube::Config::new(builder.url());
    let client = kube::Client::try_from(config).unwrap();
    (builder, client)
}

pub fn status_not_found() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "NotFound",
      "code": 404
    })
}

pub fn status_forbidden() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "Forbidden",
      "code": 403
    })
}

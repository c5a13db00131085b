mod attach_test;
mod pod_test;

use assertables::*;
use kx_testutils::*;
use tracing_test::traced_test;

use super::*;

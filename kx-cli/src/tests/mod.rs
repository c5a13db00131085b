mod cli_test;

use assertables::*;
use clap::Parser;
use kx_testutils::*;
use tracing_test::traced_test;

use super::*;

//! Shared test harness modules for the Wild Drafter server.

use super::*;

mod helpers;
mod routes_unit;
mod serve_unit;

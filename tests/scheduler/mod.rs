//! Tests for the maintenance jobs run by the cron scheduler.

mod maintenance;

use huddle::{scheduler::JobContext, service::cache::roster::ConferenceRosterCache};
use huddle_test_utils::prelude::*;

use crate::util::TestContextExt;

fn job_context(test: &TestContext) -> JobContext {
    JobContext {
        db: test.db.clone(),
        rosters: ConferenceRosterCache::new(test.source()),
    }
}

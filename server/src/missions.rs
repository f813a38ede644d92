//! Database helpers for mission completion state.

use diesel::prelude::*;
use uuid::Uuid;

use crate::models::NewStepCompletion;
use crate::schema::{step_completions, steps};

/// Step name for the tarball-creation mission.
pub const STEP_TAR: &str = "tar";

/// Step name for the tarball-extraction mission.
pub const STEP_TAR_EXTRACT: &str = "tar_extract";

/// Has this user ever completed the named step?
pub fn mission_completed(
    conn: &mut PgConnection,
    user_id: Uuid,
    step_name: &str,
) -> Result<bool, diesel::result::Error> {
    let count: i64 = step_completions::table
        .inner_join(steps::table)
        .filter(steps::name.eq(step_name))
        .filter(step_completions::user_id.eq(user_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Names of every step the user has completed.
pub fn completed_step_names(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Vec<String>, diesel::result::Error> {
    step_completions::table
        .inner_join(steps::table)
        .filter(step_completions::user_id.eq(user_id))
        .select(steps::name)
        .load(conn)
}

/// Record that the user completed the named step. Idempotent: the
/// `(user_id, step_id)` unique constraint plus `ON CONFLICT DO NOTHING`
/// means a repeat completion leaves the existing row untouched.
pub fn record_completion(
    conn: &mut PgConnection,
    user_id: Uuid,
    step_name: &str,
) -> Result<(), diesel::result::Error> {
    let step_id: Uuid = steps::table
        .filter(steps::name.eq(step_name))
        .select(steps::id)
        .first(conn)?;

    diesel::insert_into(step_completions::table)
        .values(&NewStepCompletion { user_id, step_id })
        .on_conflict((step_completions::user_id, step_completions::step_id))
        .do_nothing()
        .execute(conn)?;

    Ok(())
}

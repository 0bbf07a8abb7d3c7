// Library root: the orchestration task that owns session data and answers
// view commands with snapshots.

pub mod app;
